use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub briefing_path: PathBuf,
    /// Upper bound callers clamp requested batch sizes to.
    pub max_batch_size: usize,
    /// Text-generation calls allowed in flight per batch. `1` is sequential.
    pub max_concurrent_generations: usize,
    pub llm_timeout_secs: u64,
    pub llm_max_tokens: u32,
    pub llm_base_url: String,
    pub llm_model: String,
    /// Without a key, suggestions come from the local fallback only.
    pub llm_api_key: Option<String>,
}

impl AppConfig {
    /// Clamp a requested batch size into `[1, max_batch_size]`.
    #[must_use]
    pub fn clamp_batch_size(&self, requested: usize) -> usize {
        requested.clamp(1, self.max_batch_size.max(1))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("briefing_path", &self.briefing_path)
            .field("max_batch_size", &self.max_batch_size)
            .field(
                "max_concurrent_generations",
                &self.max_concurrent_generations,
            )
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("llm_max_tokens", &self.llm_max_tokens)
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_model", &self.llm_model)
            .field(
                "llm_api_key",
                &self.llm_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
