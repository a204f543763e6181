// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::services::{extractor::ExtractionError, quiz_generator::GenerationError};

/// Global Application Error Enum.
/// Every failure of the quiz endpoint ends up here and is mapped to a JSON body.
#[derive(Debug)]
pub enum AppError {
    // 400: no `file` field in the multipart body
    MissingFile,

    // 400: file name without a `.pdf` extension
    UnsupportedFormat,

    // 400: the PDF yielded no text
    EmptyDocument,

    // 400: unreadable or oversized multipart body
    BadRequest(String),

    // 403: the completion call itself failed on every attempt
    GenerationCallFailed(String),

    // 500: the last completion was not valid JSON
    InvalidGenerationFormat { raw_output: String },

    // 500: the last completion was JSON but not a quiz
    SchemaMismatch { detail: String, raw_output: String },

    // 500: the PDF could not be parsed at all
    ExtractionFailed(String),

    // 500
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingFile => write!(f, "No file uploaded"),
            AppError::UnsupportedFormat => write!(f, "Only PDF files are supported"),
            AppError::EmptyDocument => write!(f, "PDF has no extractable text"),
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::GenerationCallFailed(msg) => write!(f, "{}", msg),
            AppError::InvalidGenerationFormat { .. } => {
                write!(f, "Failed to generate valid JSON after multiple attempts.")
            }
            AppError::SchemaMismatch { detail, .. } => {
                write!(f, "Generated quiz did not match the expected format: {}", detail)
            }
            AppError::ExtractionFailed(msg) => write!(f, "{}", msg),
            AppError::InternalServerError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFile
            | AppError::UnsupportedFormat
            | AppError::EmptyDocument
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::GenerationCallFailed(_) => StatusCode::FORBIDDEN,
            AppError::InvalidGenerationFormat { .. }
            | AppError::SchemaMismatch { .. }
            | AppError::ExtractionFailed(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Implements `IntoResponse` for `AppError`.
/// Generation format failures carry the raw model output alongside the message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                json!({ "error": "Internal Server Error" })
            }
            AppError::InvalidGenerationFormat { raw_output }
            | AppError::SchemaMismatch { raw_output, .. } => json!({
                "error": self.to_string(),
                "raw_output": raw_output,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        AppError::ExtractionFailed(err.to_string())
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::CallFailed(msg) => AppError::GenerationCallFailed(msg),
            GenerationError::InvalidFormat { raw_output } => {
                AppError::InvalidGenerationFormat { raw_output }
            }
            GenerationError::SchemaMismatch { detail, raw_output } => {
                AppError::SchemaMismatch { detail, raw_output }
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
