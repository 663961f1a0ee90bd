//! Domain records and configuration shared by the postcraft crates.

pub mod app_config;
pub mod briefing;
pub mod config;
pub mod content;
pub mod suggestion;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use briefing::{load_briefing, Briefing, Theme};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{ContentCategory, ContentType, CreativityLevel, Platform};
pub use suggestion::{RawContent, Suggestion, SuggestionStatus};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read briefing file {path}: {source}")]
    BriefingFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse briefing file: {0}")]
    BriefingFileParse(#[from] serde_yaml::Error),

    #[error("briefing validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        from: SuggestionStatus,
        to: SuggestionStatus,
    },

    #[error("unknown content type: {0}")]
    UnknownContentType(String),

    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("unknown creativity level: {0}")]
    UnknownCreativityLevel(String),

    #[error("unknown suggestion status: {0}")]
    UnknownStatus(String),
}
