// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    config::Config,
    error::AppError,
    services::{extractor::TextExtractor, quiz_generator::QuizGenerator, storage::UploadStore},
    utils::text::{is_blank, is_pdf_filename, join_pages, truncate_chars},
};

const FILE_FIELD: &str = "file";

/// Generates a multiple-choice quiz from an uploaded PDF.
///
/// * Expects a multipart body with a `file` field holding a `.pdf` document.
/// * Stores the upload under a per-request directory and extracts its text.
/// * Sends the leading part of the text to the completion service and
///   returns the validated questions as a JSON array.
#[tracing::instrument(
    skip_all,
    fields(request_id = tracing::field::Empty, filename = tracing::field::Empty)
)]
pub async fn generate_quiz(
    State(config): State<Config>,
    State(uploads): State<UploadStore>,
    State(extractor): State<Arc<dyn TextExtractor>>,
    State(generator): State<Arc<QuizGenerator>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::Span::current();
    span.record("request_id", tracing::field::display(request_id));

    // A body that is not multipart at all cannot carry a `file` field.
    let multipart = multipart.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Request body is not multipart");
        AppError::MissingFile
    })?;

    let (filename, data) = read_pdf_field(multipart).await?;
    span.record("filename", filename.as_str());

    let upload = uploads.save(request_id, &filename, &data).await?;

    let extracted = extractor.extract_pages(upload.path()).await;
    if let Err(e) = upload.discard().await {
        tracing::warn!(error = %e, "Failed to remove stored upload");
    }
    let text = join_pages(&extracted?);

    if is_blank(&text) {
        tracing::warn!("Uploaded PDF has no extractable text");
        return Err(AppError::EmptyDocument);
    }

    let source_text = truncate_chars(&text, config.max_source_chars);
    tracing::info!(
        extracted_chars = text.chars().count(),
        source_chars = source_text.chars().count(),
        "Generating quiz"
    );

    let questions = generator.generate(source_text).await?;

    tracing::info!(question_count = questions.len(), "Quiz generated");

    Ok(Json(questions))
}

/// Finds the `file` field and returns its name and bytes.
///
/// Other fields are skipped. The extension is checked before the body is read,
/// so a rejected upload is never buffered or written to disk. Multipart errors,
/// including an exceeded body limit, are reported as 400.
async fn read_pdf_field(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(AppError::MissingFile),
        };

        if !is_pdf_filename(&filename) {
            tracing::warn!(filename = %filename, "Rejected non-PDF upload");
            return Err(AppError::UnsupportedFormat);
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        return Ok((filename, data));
    }

    Err(AppError::MissingFile)
}
