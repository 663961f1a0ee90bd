//! Generated content records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ContentType, CoreError, CreativityLevel, Platform};

/// Structured text parsed out of one generation call, before platform packing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContent {
    pub title: String,
    pub body: String,
    /// `#`-prefixed tags, unique ignoring case, in priority order.
    pub hashtags: Vec<String>,
    pub call_to_action: String,
}

/// Review state of a suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    #[default]
    PendingReview,
    Approved,
    Rejected,
    ThumbsUp,
    ThumbsDown,
}

impl SuggestionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionStatus::PendingReview => "pending_review",
            SuggestionStatus::Approved => "approved",
            SuggestionStatus::Rejected => "rejected",
            SuggestionStatus::ThumbsUp => "thumbs_up",
            SuggestionStatus::ThumbsDown => "thumbs_down",
        }
    }

    /// Approved and rejected suggestions accept no further changes.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, SuggestionStatus::Approved | SuggestionStatus::Rejected)
    }

    #[must_use]
    pub fn can_transition_to(self, next: SuggestionStatus) -> bool {
        match self {
            SuggestionStatus::PendingReview => next != SuggestionStatus::PendingReview,
            SuggestionStatus::ThumbsUp | SuggestionStatus::ThumbsDown => {
                next != self && next != SuggestionStatus::PendingReview
            }
            SuggestionStatus::Approved | SuggestionStatus::Rejected => false,
        }
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending_review" => Ok(SuggestionStatus::PendingReview),
            "approved" => Ok(SuggestionStatus::Approved),
            "rejected" => Ok(SuggestionStatus::Rejected),
            "thumbs_up" => Ok(SuggestionStatus::ThumbsUp),
            "thumbs_down" => Ok(SuggestionStatus::ThumbsDown),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

/// A platform-ready post draft awaiting review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub batch_id: Uuid,
    pub content_type: ContentType,
    pub platform: Platform,
    /// Business the briefing belongs to.
    pub business_name: String,
    pub theme: String,
    pub template_format: String,
    pub full_text: String,
    pub hashtags: Vec<String>,
    pub call_to_action: String,
    pub character_count: usize,
    pub within_limits: bool,
    pub engagement_score: u8,
    pub estimated_reach: String,
    pub estimated_interactions: String,
    pub status: SuggestionStatus,
    /// Batch wall time divided by batch size, in seconds.
    pub generation_time: f64,
    pub creativity_level: CreativityLevel,
    /// `true` when the text came from the local fallback instead of the provider.
    pub used_fallback: bool,
    pub suggested_post_time: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Suggestion {
    /// Move the suggestion to a new review state.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidStatusTransition`] if the current state
    /// does not allow moving to `next`.
    pub fn transition(&mut self, next: SuggestionStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
