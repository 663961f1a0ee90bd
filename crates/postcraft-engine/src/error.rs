use std::time::Duration;

use postcraft_core::ContentType;
use thiserror::Error;

/// Failures of the external text-generation collaborator.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rejected credentials (HTTP 401/403).
    #[error("provider rejected credentials: {0}")]
    Auth(String),

    /// Rate limit or quota exhausted (HTTP 429).
    #[error("provider quota exceeded: {0}")]
    Quota(String),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned no text")]
    EmptyResponse,

    #[error("provider call timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("invalid provider configuration: {0}")]
    Config(String),
}

/// Per-slot failures. The batch pipeline recovers from all of these.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no templates for content type {0}")]
    MissingTemplate(ContentType),

    #[error("no themes available for content type {0}")]
    MissingTheme(ContentType),

    #[error("text generation failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Batch-level failures surfaced to the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("batch incomplete: produced {produced} of {requested} suggestions")]
    BatchIncomplete { requested: usize, produced: usize },
}
