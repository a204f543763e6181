// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    services::{
        extractor::{LopdfExtractor, TextExtractor},
        llm::{CompletionClient, OpenAiClient},
        quiz_generator::{GenerationSettings, QuizGenerator},
        storage::UploadStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub uploads: UploadStore,
    pub extractor: Arc<dyn TextExtractor>,
    pub generator: Arc<QuizGenerator>,
}

impl AppState {
    /// Wires the production collaborators: lopdf extraction and the OpenAI client.
    pub async fn from_config(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let client: Arc<dyn CompletionClient> = Arc::new(OpenAiClient::from_config(&config)?);
        let extractor: Arc<dyn TextExtractor> = Arc::new(LopdfExtractor::new());

        Self::with_collaborators(config, extractor, client).await
    }

    /// Builds the state around caller-supplied extraction and completion backends.
    pub async fn with_collaborators(
        config: Config,
        extractor: Arc<dyn TextExtractor>,
        client: Arc<dyn CompletionClient>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let uploads = UploadStore::new(config.upload_dir.clone()).await?;
        let generator = Arc::new(QuizGenerator::new(
            client,
            GenerationSettings::from_config(&config),
        ));

        Ok(Self {
            config,
            uploads,
            extractor,
            generator,
        })
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for UploadStore {
    fn from_ref(state: &AppState) -> Self {
        state.uploads.clone()
    }
}

impl FromRef<AppState> for Arc<dyn TextExtractor> {
    fn from_ref(state: &AppState) -> Self {
        state.extractor.clone()
    }
}

impl FromRef<AppState> for Arc<QuizGenerator> {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}
