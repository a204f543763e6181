// src/services/extractor.rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lopdf::Document;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Turns a stored document into per-page text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns one entry per page, in page order. Pages without text are empty strings.
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError>;
}

/// PDF extraction backed by `lopdf`, run on the blocking pool.
#[derive(Debug, Default, Clone)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(path: &Path) -> Result<Vec<String>, ExtractionError> {
        let doc = Document::load(path).map_err(|e| ExtractionError::Parse(e.to_string()))?;

        // `get_pages` is keyed by page number, so iteration is already in page order.
        let pages = doc
            .get_pages()
            .into_keys()
            .map(|page_number| {
                doc.extract_text(&[page_number]).unwrap_or_else(|e| {
                    tracing::debug!(page_number, error = %e, "Page yielded no text");
                    String::new()
                })
            })
            .collect();

        Ok(pages)
    }
}

#[async_trait]
impl TextExtractor for LopdfExtractor {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let owned: PathBuf = path.to_path_buf();

        let pages = tokio::task::spawn_blocking(move || Self::extract_blocking(&owned))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        Ok(pages)
    }
}
