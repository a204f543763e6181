// src/services/quiz_generator.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    config::Config,
    models::question::QuizQuestion,
    services::llm::{CompletionClient, CompletionRequest},
};

/// Terminal outcome of a generation run that never produced a usable quiz.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("{0}")]
    CallFailed(String),

    #[error("completion was not valid JSON")]
    InvalidFormat { raw_output: String },

    #[error("completion did not match the quiz schema: {detail}")]
    SchemaMismatch { detail: String, raw_output: String },
}

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    /// Total attempts, initial call included. Treated as at least 1.
    pub max_attempts: u32,
    pub question_count: usize,
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.openai_model.clone(),
            temperature: config.openai_temperature,
            max_attempts: config.max_attempts,
            question_count: config.question_count,
        }
    }
}

pub struct QuizGenerator {
    client: Arc<dyn CompletionClient>,
    settings: GenerationSettings,
}

impl QuizGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }

    /// Asks the completion service for a quiz over `source_text`.
    ///
    /// Every attempt re-sends the full prompt. Call failures, non-JSON output and
    /// schema mismatches are retried until `max_attempts` is spent; the last
    /// failure is returned.
    pub async fn generate(&self, source_text: &str) -> Result<Vec<QuizQuestion>, GenerationError> {
        let request = CompletionRequest {
            prompt: build_prompt(source_text, self.settings.question_count),
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
        };
        let max_attempts = self.settings.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;
            tracing::info!(
                attempt,
                max_attempts,
                prompt_len = request.prompt.len(),
                "Requesting quiz completion"
            );

            let failure = match self.client.complete(&request).await {
                Ok(raw_output) => {
                    tracing::debug!(attempt, completion_len = raw_output.len(), "Completion received");
                    match parse_questions(&raw_output, self.settings.question_count) {
                        Ok(questions) => return Ok(questions),
                        Err(e) => e,
                    }
                }
                Err(e) => GenerationError::CallFailed(e.to_string()),
            };

            if attempt >= max_attempts {
                tracing::error!(attempt, error = %failure, "Quiz generation failed");
                return Err(failure);
            }
            tracing::warn!(attempt, error = %failure, "Quiz generation attempt failed, retrying");
        }
    }
}

/// Builds the single-turn prompt for `question_count` questions over `source_text`.
pub fn build_prompt(source_text: &str, question_count: usize) -> String {
    format!(
        r#"From the following text, generate exactly {question_count} multiple-choice questions.
Each question must be a JSON object in the following format:

{{
  "QuestionId": 0,
  "Comp_body": "...the passage the question is based on...",
  "Question": "...the question...",
  "Opt_1": "...",
  "Opt_2": "...",
  "Opt_3": "...",
  "Opt_4": "...",
  "Correct_answer": "...must repeat the exact text of one option..."
}}

Return ONLY the JSON array of {question_count} objects, with no other text.

TEXT:
"""{source_text}"""
"#
    )
}

/// Parses a completion into exactly `expected_count` valid questions.
pub fn parse_questions(
    raw_output: &str,
    expected_count: usize,
) -> Result<Vec<QuizQuestion>, GenerationError> {
    let value: serde_json::Value =
        serde_json::from_str(raw_output.trim()).map_err(|_| GenerationError::InvalidFormat {
            raw_output: raw_output.to_string(),
        })?;

    let mismatch = |detail: String| GenerationError::SchemaMismatch {
        detail,
        raw_output: raw_output.to_string(),
    };

    let questions: Vec<QuizQuestion> =
        serde_json::from_value(value).map_err(|e| mismatch(e.to_string()))?;

    if questions.len() != expected_count {
        return Err(mismatch(format!(
            "expected {} questions, got {}",
            expected_count,
            questions.len()
        )));
    }

    for (index, question) in questions.iter().enumerate() {
        question
            .validate()
            .map_err(|e| mismatch(format!("question {}: {}", index + 1, e)))?;
    }

    Ok(questions)
}
