// src/handlers/health.rs

/// Plain-text liveness probe.
pub async fn liveness() -> &'static str {
    "PDF quiz backend is live."
}
