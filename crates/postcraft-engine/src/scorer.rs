//! Heuristic engagement estimate for packed posts.

use serde::{Deserialize, Serialize};

use crate::platforms::PlatformProfile;

const BASE_SCORE: i32 = 50;
const NEAR_OPTIMAL_BONUS: i32 = 10;
const HASHTAG_BONUS: i32 = 5;
const CTA_BONUS: i32 = 10;
const OPTIMIZED_BONUS: i32 = 15;

/// Largest magnitude of the random jitter term.
pub const MAX_JITTER: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementEstimate {
    /// 0 to 100.
    pub score: u8,
    /// `"{score*10}-{score*20}"`.
    pub estimated_reach: String,
    /// `"{score/10}-{score/5}"`.
    pub estimated_interactions: String,
}

/// Signals the estimate is computed from.
#[derive(Debug, Clone, Copy)]
pub struct EngagementInputs {
    pub character_count: usize,
    pub hashtag_count: usize,
    pub has_cta: bool,
    pub within_limits: bool,
}

/// Score a packed post.
///
/// `jitter` is clamped to `[-MAX_JITTER, MAX_JITTER]`; callers draw it from
/// their injected RNG.
#[must_use]
pub fn engagement_score(
    inputs: EngagementInputs,
    profile: &PlatformProfile,
    jitter: i32,
) -> EngagementEstimate {
    let mut score = BASE_SCORE;

    #[allow(clippy::cast_precision_loss)]
    let near_optimal = {
        let optimal = profile.optimal_length as f64;
        (inputs.character_count as f64 - optimal).abs() < 0.2 * optimal
    };
    if near_optimal {
        score += NEAR_OPTIMAL_BONUS;
    }
    if inputs.hashtag_count > 0 && inputs.hashtag_count <= profile.hashtag_limit {
        score += HASHTAG_BONUS;
    }
    if inputs.has_cta {
        score += CTA_BONUS;
    }
    if inputs.within_limits {
        score += OPTIMIZED_BONUS;
    }
    score += jitter.clamp(-MAX_JITTER, MAX_JITTER);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = score.clamp(0, 100) as u8;
    let s = u32::from(score);
    EngagementEstimate {
        score,
        estimated_reach: format!("{}-{}", s * 10, s * 20),
        estimated_interactions: format!("{}-{}", s / 10, s / 5),
    }
}

#[cfg(test)]
mod tests {
    use postcraft_core::Platform;

    use super::*;
    use crate::platforms::profile;

    fn inputs(character_count: usize) -> EngagementInputs {
        EngagementInputs {
            character_count,
            hashtag_count: 2,
            has_cta: true,
            within_limits: true,
        }
    }

    #[test]
    fn full_marks_without_jitter() {
        // 50 + 10 + 5 + 10 + 15
        let est = engagement_score(inputs(200), profile(Platform::Twitter), 0);
        assert_eq!(est.score, 90);
        assert_eq!(est.estimated_reach, "900-1800");
        assert_eq!(est.estimated_interactions, "9-18");
    }

    #[test]
    fn far_from_optimal_loses_length_bonus() {
        let est = engagement_score(inputs(40), profile(Platform::Twitter), 0);
        assert_eq!(est.score, 80);
    }

    #[test]
    fn too_many_hashtags_lose_bonus() {
        let mut i = inputs(200);
        i.hashtag_count = 9;
        let est = engagement_score(i, profile(Platform::Twitter), 0);
        assert_eq!(est.score, 85);
    }

    #[test]
    fn jitter_is_clamped() {
        let high = engagement_score(inputs(200), profile(Platform::Twitter), 500);
        assert_eq!(high.score, 100);
        let low = engagement_score(
            EngagementInputs {
                character_count: 0,
                hashtag_count: 0,
                has_cta: false,
                within_limits: false,
            },
            profile(Platform::Twitter),
            -500,
        );
        assert_eq!(low.score, 40);
    }

    #[test]
    fn score_always_in_bounds() {
        for jitter in -MAX_JITTER..=MAX_JITTER {
            for count in [0, 100, 200, 280, 5000] {
                let est = engagement_score(inputs(count), profile(Platform::Linkedin), jitter);
                assert!(est.score <= 100);
            }
        }
    }
}
