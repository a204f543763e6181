// src/config.rs

use std::{env, path::PathBuf, str::FromStr};

use dotenvy::dotenv;
use secrecy::SecretString;
use url::Url;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Errors raised while loading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_temperature: f32,
    pub openai_timeout_secs: u64,

    /// Total completion attempts per request (initial call included).
    pub max_attempts: u32,
    pub question_count: usize,
    /// Extracted text is cut to this many characters before prompting.
    pub max_source_chars: usize,

    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,

    pub server_host: String,
    pub server_port: u16,
    pub cors_allowed_origins: Vec<String>,

    pub rust_log: String,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let openai_base_url = lookup("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        Url::parse(&openai_base_url).map_err(|e| ConfigError::Invalid {
            key: "OPENAI_BASE_URL",
            reason: e.to_string(),
        })?;

        let openai_temperature: f32 = parse_or(&lookup, "OPENAI_TEMPERATURE", 0.7)?;
        if !(0.0..=2.0).contains(&openai_temperature) {
            return Err(ConfigError::Invalid {
                key: "OPENAI_TEMPERATURE",
                reason: format!("{openai_temperature} is outside 0.0..=2.0"),
            });
        }

        let max_attempts: u32 = parse_or(&lookup, "GENERATION_MAX_ATTEMPTS", 2)?;
        let question_count: usize = parse_or(&lookup, "QUIZ_QUESTION_COUNT", 10)?;
        let max_source_chars: usize = parse_or(&lookup, "MAX_SOURCE_CHARS", 3000)?;
        require_positive("GENERATION_MAX_ATTEMPTS", max_attempts as usize)?;
        require_positive("QUIZ_QUESTION_COUNT", question_count)?;
        require_positive("MAX_SOURCE_CHARS", max_source_chars)?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                Url::parse(origin)
                    .map(|_| origin.to_string())
                    .map_err(|e| ConfigError::Invalid {
                        key: "CORS_ALLOWED_ORIGINS",
                        reason: format!("'{origin}': {e}"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            openai_api_key: SecretString::from(openai_api_key),
            openai_base_url,
            openai_model: lookup("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_temperature,
            openai_timeout_secs: parse_or(&lookup, "OPENAI_TIMEOUT_SECS", 120)?,
            max_attempts,
            question_count,
            max_source_chars,
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or(&lookup, "SERVER_PORT", 3000)?,
            cors_allowed_origins,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_dir: lookup("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("'{raw}': {e}"),
        }),
        None => Ok(default),
    }
}

fn require_positive(key: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            key,
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
