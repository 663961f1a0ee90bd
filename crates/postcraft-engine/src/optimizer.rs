//! Platform packing: fit raw content into a platform's length and hashtag
//! budget, then estimate engagement.
//!
//! All lengths are counted in `char`s.

use postcraft_core::RawContent;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::platforms::PlatformProfile;
use crate::scorer::{engagement_score, EngagementEstimate, EngagementInputs, MAX_JITTER};

/// Room kept free for the call to action when trimming long text.
const CTA_RESERVE: usize = 50;
/// Slack kept when trimming the body to make room for CTA and hashtags.
const FINAL_SLACK: usize = 10;
const ELLIPSIS: &str = "...";

/// Packed post text and its derived fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedContent {
    pub full_text: String,
    pub hashtags: Vec<String>,
    pub call_to_action: String,
    pub character_count: usize,
    pub within_limits: bool,
    pub engagement: EngagementEstimate,
}

/// Pack `content` for `profile`.
///
/// The result never exceeds `profile.max_length`: when trimming the body is
/// not enough, hashtags are dropped and the text is hard-clamped.
pub fn optimize<R: Rng + ?Sized>(
    rng: &mut R,
    content: &RawContent,
    profile: &PlatformProfile,
) -> OptimizedContent {
    let max_length = profile.max_length;

    let mut text = if content.title.is_empty() {
        content.body.clone()
    } else if content.body.is_empty() {
        content.title.clone()
    } else {
        format!("{}\n\n{}", content.title, content.body)
    };

    if char_len(&text) > max_length {
        text = truncate_at_sentences(&text, max_length.saturating_sub(CTA_RESERVE));
    }

    if !profile.hooks.iter().any(|h| text.starts_with(h)) {
        if let Some(hook) = profile.hooks.choose(rng) {
            text = format!("{hook} {text}");
        }
    }

    let cta = content.call_to_action.trim();
    let mut hashtags: Vec<String> = content
        .hashtags
        .iter()
        .take(profile.hashtag_limit)
        .cloned()
        .collect();
    let mut tags = hashtags.join(" ");

    let mut full_text = compose(&text, cta, &tags);

    if char_len(&full_text) > max_length {
        let budget = max_length.saturating_sub(char_len(cta) + char_len(&tags) + FINAL_SLACK);
        let body = format!("{}{ELLIPSIS}", truncate_chars(&text, budget).trim_end());
        full_text = compose(&body, cta, &tags);

        if char_len(&full_text) > max_length {
            tracing::debug!(
                platform = %profile.platform,
                "dropping hashtags to fit length limit"
            );
            hashtags.clear();
            tags.clear();
            full_text = compose(&body, cta, &tags);
        }
        if char_len(&full_text) > max_length {
            full_text = truncate_chars(&full_text, max_length).to_string();
        }
    }

    let character_count = char_len(&full_text);
    let within_limits = character_count <= max_length;
    let jitter = rng.random_range(-MAX_JITTER..=MAX_JITTER);
    let engagement = engagement_score(
        EngagementInputs {
            character_count,
            hashtag_count: hashtags.len(),
            has_cta: !cta.is_empty(),
            within_limits,
        },
        profile,
        jitter,
    );

    OptimizedContent {
        full_text,
        hashtags,
        call_to_action: cta.to_string(),
        character_count,
        within_limits,
        engagement,
    }
}

fn compose(body: &str, cta: &str, tags: &str) -> String {
    let mut out = body.to_string();
    for part in [cta, tags] {
        if !part.is_empty() {
            out.push_str("\n\n");
            out.push_str(part);
        }
    }
    out
}

/// Keep whole `". "`-separated sentences while the result stays within
/// `budget`; hard-truncate with an ellipsis when not even one fits.
fn truncate_at_sentences(text: &str, budget: usize) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut running = 0;
    for sentence in text.split(". ") {
        let sep = if kept.is_empty() { 0 } else { 2 };
        let needed = running + sep + char_len(sentence);
        // One more for the closing period.
        if needed + 1 > budget {
            break;
        }
        running = needed;
        kept.push(sentence);
    }

    if running == 0 {
        return format!("{}{ELLIPSIS}", truncate_chars(text, budget).trim_end());
    }

    let mut out = kept.join(". ");
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Longest prefix of `s` with at most `max_chars` chars.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "optimizer_test.rs"]
mod tests;
