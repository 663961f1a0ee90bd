//! Closed vocabularies: content types, platforms, and creativity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// The kind of post a suggestion represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Educational,
    Promotional,
    Entertaining,
    Inspirational,
    BehindTheScenes,
    UserGenerated,
    IndustryNews,
}

/// Call-to-action family a content type draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCategory {
    /// Comments, saves, and shares.
    Engagement,
    /// Clicks, sign-ups, and purchases.
    Conversion,
    /// Conversation and following.
    Community,
}

impl ContentType {
    pub const ALL: [ContentType; 7] = [
        ContentType::Educational,
        ContentType::Promotional,
        ContentType::Entertaining,
        ContentType::Inspirational,
        ContentType::BehindTheScenes,
        ContentType::UserGenerated,
        ContentType::IndustryNews,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Educational => "educational",
            ContentType::Promotional => "promotional",
            ContentType::Entertaining => "entertaining",
            ContentType::Inspirational => "inspirational",
            ContentType::BehindTheScenes => "behind_the_scenes",
            ContentType::UserGenerated => "user_generated",
            ContentType::IndustryNews => "industry_news",
        }
    }

    /// Human-readable label used inside prompts, e.g. `"behind the scenes"`.
    #[must_use]
    pub fn label(self) -> String {
        self.as_str().replace('_', " ")
    }

    #[must_use]
    pub fn category(self) -> ContentCategory {
        match self {
            ContentType::Educational | ContentType::Inspirational => ContentCategory::Engagement,
            ContentType::Promotional => ContentCategory::Conversion,
            ContentType::Entertaining
            | ContentType::BehindTheScenes
            | ContentType::UserGenerated
            | ContentType::IndustryNews => ContentCategory::Community,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownContentType(s.to_string()))
    }
}

/// Social network a suggestion is packed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Linkedin,
    Facebook,
    Instagram,
    Tiktok,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Facebook,
        Platform::Instagram,
        Platform::Tiktok,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "twitter" | "x" => Ok(Platform::Twitter),
            "linkedin" => Ok(Platform::Linkedin),
            "facebook" => Ok(Platform::Facebook),
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::Tiktok),
            _ => Err(CoreError::UnknownPlatform(s.to_string())),
        }
    }
}

/// Style setting that maps to the sampling temperature of the text generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreativityLevel {
    Conservative,
    #[default]
    Balanced,
    Creative,
}

impl CreativityLevel {
    #[must_use]
    pub fn temperature(self) -> f32 {
        match self {
            CreativityLevel::Conservative => 0.3,
            CreativityLevel::Balanced => 0.7,
            CreativityLevel::Creative => 0.9,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CreativityLevel::Conservative => "conservative",
            CreativityLevel::Balanced => "balanced",
            CreativityLevel::Creative => "creative",
        }
    }
}

impl fmt::Display for CreativityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreativityLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Ok(CreativityLevel::Conservative),
            "balanced" => Ok(CreativityLevel::Balanced),
            "creative" => Ok(CreativityLevel::Creative),
            _ => Err(CoreError::UnknownCreativityLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_parses_loose_spellings() {
        assert_eq!(
            "behind-the-scenes".parse::<ContentType>().unwrap(),
            ContentType::BehindTheScenes
        );
        assert_eq!(
            "Industry News".parse::<ContentType>().unwrap(),
            ContentType::IndustryNews
        );
        assert_eq!(
            "educational".parse::<ContentType>().unwrap(),
            ContentType::Educational
        );
    }

    #[test]
    fn content_type_rejects_unknown() {
        let err = "memes".parse::<ContentType>().unwrap_err();
        assert_eq!(err, CoreError::UnknownContentType("memes".to_string()));
    }

    #[test]
    fn content_type_categories() {
        assert_eq!(
            ContentType::Educational.category(),
            ContentCategory::Engagement
        );
        assert_eq!(
            ContentType::Inspirational.category(),
            ContentCategory::Engagement
        );
        assert_eq!(
            ContentType::Promotional.category(),
            ContentCategory::Conversion
        );
        assert_eq!(
            ContentType::Entertaining.category(),
            ContentCategory::Community
        );
    }

    #[test]
    fn content_type_serde_is_snake_case() {
        let json = serde_json::to_string(&ContentType::UserGenerated).unwrap();
        assert_eq!(json, "\"user_generated\"");
        assert_eq!(ContentType::UserGenerated.label(), "user generated");
    }

    #[test]
    fn platform_accepts_x_alias() {
        assert_eq!("X".parse::<Platform>().unwrap(), Platform::Twitter);
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn creativity_temperatures() {
        assert!((CreativityLevel::Conservative.temperature() - 0.3).abs() < f32::EPSILON);
        assert!((CreativityLevel::Balanced.temperature() - 0.7).abs() < f32::EPSILON);
        assert!((CreativityLevel::Creative.temperature() - 0.9).abs() < f32::EPSILON);
        assert_eq!(CreativityLevel::default(), CreativityLevel::Balanced);
    }
}
