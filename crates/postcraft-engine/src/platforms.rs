//! Per-platform packing constraints.

use postcraft_core::{ContentType, Platform};

#[derive(Debug, PartialEq)]
pub struct PlatformProfile {
    pub platform: Platform,
    /// Hard character limit.
    pub max_length: usize,
    /// Length that tends to perform best.
    pub optimal_length: usize,
    pub hashtag_limit: usize,
    pub best_posting_times: &'static [&'static str],
    pub preferred_content: &'static [ContentType],
    /// Opening phrases; text already starting with one is left alone.
    pub hooks: &'static [&'static str],
}

static PROFILES: [PlatformProfile; 5] = [
    PlatformProfile {
        platform: Platform::Twitter,
        max_length: 280,
        optimal_length: 200,
        hashtag_limit: 3,
        best_posting_times: &["09:00", "12:00", "17:00"],
        preferred_content: &[
            ContentType::IndustryNews,
            ContentType::Educational,
            ContentType::Entertaining,
        ],
        hooks: &["Quick tip:", "Hot take:", "Did you know?"],
    },
    PlatformProfile {
        platform: Platform::Linkedin,
        max_length: 3000,
        optimal_length: 1300,
        hashtag_limit: 5,
        best_posting_times: &["08:00", "12:00", "17:30"],
        preferred_content: &[
            ContentType::Educational,
            ContentType::IndustryNews,
            ContentType::Inspirational,
        ],
        hooks: &[
            "Here's what we've learned:",
            "Let's talk about this.",
            "A lesson worth sharing:",
        ],
    },
    PlatformProfile {
        platform: Platform::Facebook,
        max_length: 63_206,
        optimal_length: 400,
        hashtag_limit: 3,
        best_posting_times: &["09:00", "13:00", "15:00"],
        preferred_content: &[
            ContentType::BehindTheScenes,
            ContentType::UserGenerated,
            ContentType::Entertaining,
        ],
        hooks: &["Hey friends!", "Quick question:", "We have to share this."],
    },
    PlatformProfile {
        platform: Platform::Instagram,
        max_length: 2200,
        optimal_length: 1000,
        hashtag_limit: 10,
        best_posting_times: &["11:00", "14:00", "19:00"],
        preferred_content: &[
            ContentType::Inspirational,
            ContentType::BehindTheScenes,
            ContentType::Promotional,
        ],
        hooks: &["Save this for later!", "Double tap if you agree.", "New post alert!"],
    },
    PlatformProfile {
        platform: Platform::Tiktok,
        max_length: 2200,
        optimal_length: 150,
        hashtag_limit: 5,
        best_posting_times: &["07:00", "16:00", "21:00"],
        preferred_content: &[
            ContentType::Entertaining,
            ContentType::BehindTheScenes,
            ContentType::UserGenerated,
        ],
        hooks: &["POV:", "Wait for it...", "Nobody talks about this:"],
    },
];

/// Look up the static profile for a platform.
#[must_use]
pub fn profile(platform: Platform) -> &'static PlatformProfile {
    match platform {
        Platform::Twitter => &PROFILES[0],
        Platform::Linkedin => &PROFILES[1],
        Platform::Facebook => &PROFILES[2],
        Platform::Instagram => &PROFILES[3],
        Platform::Tiktok => &PROFILES[4],
    }
}

impl PlatformProfile {
    #[must_use]
    pub fn prefers(&self, content_type: ContentType) -> bool {
        self.preferred_content.contains(&content_type)
    }

    /// Best posting time for the `index`-th suggestion, round-robin.
    #[must_use]
    pub fn posting_time(&self, index: usize) -> Option<&'static str> {
        if self.best_posting_times.is_empty() {
            return None;
        }
        Some(self.best_posting_times[index % self.best_posting_times.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_lookup_matches_platform() {
        for platform in Platform::ALL {
            assert_eq!(profile(platform).platform, platform);
        }
    }

    #[test]
    fn twitter_limits() {
        let p = profile(Platform::Twitter);
        assert_eq!(p.max_length, 280);
        assert_eq!(p.optimal_length, 200);
        assert_eq!(p.hashtag_limit, 3);
    }

    #[test]
    fn optimal_length_never_exceeds_max() {
        for platform in Platform::ALL {
            let p = profile(platform);
            assert!(p.optimal_length <= p.max_length, "{platform}");
            assert!(!p.hooks.is_empty(), "{platform} has no hooks");
        }
    }

    #[test]
    fn posting_time_round_robins() {
        let p = profile(Platform::Twitter);
        assert_eq!(p.posting_time(0), Some("09:00"));
        assert_eq!(p.posting_time(1), Some("12:00"));
        assert_eq!(p.posting_time(3), Some("09:00"));
    }

    #[test]
    fn prefers_reflects_table() {
        assert!(profile(Platform::Linkedin).prefers(ContentType::Educational));
        assert!(!profile(Platform::Linkedin).prefers(ContentType::UserGenerated));
    }
}
