use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ContentType};

/// A recurring topic the business posts about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Content types this theme fits. Empty means every type.
    #[serde(default)]
    pub suitable_for: Vec<ContentType>,
}

impl Theme {
    #[must_use]
    pub fn is_suitable_for(&self, content_type: ContentType) -> bool {
        self.suitable_for.is_empty() || self.suitable_for.contains(&content_type)
    }

    /// Catch-all theme used when a briefing carries no themes at all.
    #[must_use]
    pub fn general(industry: &str) -> Self {
        let industry = industry.trim();
        let description = if industry.is_empty() {
            "General updates and insights for our audience".to_string()
        } else {
            format!("General updates and insights from the {industry} space")
        };
        Self {
            name: "General".to_string(),
            description,
            suitable_for: Vec::new(),
        }
    }
}

/// Content strategy for one business, as produced by the strategist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Briefing {
    pub business_name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default = "default_tone")]
    pub brand_voice: String,
    #[serde(default)]
    pub themes: Vec<Theme>,
    /// Content type to percentage. Treated as relative weights.
    #[serde(default)]
    pub content_mix: HashMap<ContentType, u32>,
}

fn default_tone() -> String {
    "professional".to_string()
}

impl Briefing {
    #[must_use]
    pub fn themes_for(&self, content_type: ContentType) -> Vec<&Theme> {
        self.themes
            .iter()
            .filter(|t| t.is_suitable_for(content_type))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct BriefingFile {
    briefing: Briefing,
}

/// Load and validate a briefing from a YAML file.
///
/// The file holds a single top-level `briefing:` mapping.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_briefing(path: &Path) -> Result<Briefing, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BriefingFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: BriefingFile = serde_yaml::from_str(&content).map_err(ConfigError::BriefingFileParse)?;

    validate_briefing(&file.briefing)?;

    Ok(file.briefing)
}

fn validate_briefing(briefing: &Briefing) -> Result<(), ConfigError> {
    if briefing.business_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "business name must be non-empty".to_string(),
        ));
    }

    let mut seen_themes = HashSet::new();
    for theme in &briefing.themes {
        if theme.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme name must be non-empty".to_string(),
            ));
        }
        if !seen_themes.insert(theme.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate theme name: '{}'",
                theme.name
            )));
        }
    }

    for (content_type, pct) in &briefing.content_mix {
        if *pct > 100 {
            return Err(ConfigError::Validation(format!(
                "content mix for '{content_type}' is {pct}%; must be at most 100"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "briefing_test.rs"]
mod tests;
