//! Batch orchestration.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use postcraft_core::{Briefing, ContentType, CreativityLevel, Platform, Suggestion, SuggestionStatus};
use rand::Rng;
use uuid::Uuid;

use crate::allocator::{allocate, Allocation};
use crate::error::{EngineError, GenerationError};
use crate::generator::{
    finish, AcquiredText, GeneratedContent, GenerationPreferences, SuggestionGenerator,
};
use crate::optimizer::{optimize, OptimizedContent};
use crate::platforms::profile;

/// Everything one batch run needs from the caller.
#[derive(Debug, Clone, Copy)]
pub struct BatchRequest<'a> {
    pub briefing: &'a Briefing,
    /// Already clamped by the caller to `[1, max_batch_size]`.
    pub batch_size: usize,
    pub platforms: &'a [Platform],
    pub content_types: &'a [ContentType],
    pub preferences: &'a GenerationPreferences,
    pub creativity: CreativityLevel,
}

/// A content type / platform pair waiting to be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    content_type: ContentType,
    platform: Platform,
}

/// A filled slot before it is stamped into a [`Suggestion`].
struct Draft {
    content_type: ContentType,
    platform: Platform,
    generated: GeneratedContent,
    optimized: OptimizedContent,
}

/// Runs allocation, generation, and optimization for a whole batch.
#[derive(Clone)]
pub struct BatchOrchestrator {
    generator: SuggestionGenerator,
    max_concurrent: usize,
}

impl BatchOrchestrator {
    /// Sequential text acquisition by default.
    #[must_use]
    pub fn new(generator: SuggestionGenerator) -> Self {
        Self {
            generator,
            max_concurrent: 1,
        }
    }

    /// Number of provider calls allowed in flight at once. Values below 1
    /// are treated as 1.
    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Generate exactly `request.batch_size` suggestions.
    ///
    /// 1. Allocate the batch across content types from the briefing's mix.
    /// 2. Assign platforms round-robin over the allocated slots.
    /// 3. Fill every slot; skipped slots are topped up with random
    ///    content type / platform pairs from the requested lists, leaving
    ///    out content types that could not be planned in this batch.
    /// 4. Stamp ids, batch id, timing and review status.
    ///
    /// Slots that cannot be planned are skipped. A failed provider call is
    /// retried once with the local fallback when the generator allows it,
    /// otherwise the slot is skipped. Neither aborts the batch.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] for an empty platform or
    /// content-type list or a zero batch size, and
    /// [`EngineError::BatchIncomplete`] when top-up attempts run out before
    /// the batch is full.
    pub async fn generate_batch<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        request: &BatchRequest<'_>,
    ) -> Result<Vec<Suggestion>, EngineError> {
        if request.platforms.is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "at least one platform is required".to_string(),
            ));
        }
        if request.content_types.is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "at least one content type is required".to_string(),
            ));
        }
        if request.batch_size == 0 {
            return Err(EngineError::InvalidConfiguration(
                "batch size must be at least 1".to_string(),
            ));
        }

        let started = Instant::now();
        let batch_id = Uuid::new_v4();
        let batch_size = request.batch_size;

        let allocation = allocate(
            &request.briefing.content_mix,
            batch_size,
            request.content_types,
        )?;
        let slots = assign_slots(&allocation, request.platforms);
        tracing::debug!(
            %batch_id,
            batch_size,
            content_types = allocation.len(),
            provider = self.generator.has_provider(),
            "allocated batch"
        );

        let mut unplannable = HashSet::new();
        let mut drafts = self.fill_slots(rng, request, &slots, &mut unplannable).await;

        let max_attempts = top_up_limit(batch_size);
        let mut attempts = 0;
        while drafts.len() < batch_size {
            let candidates = top_up_candidates(request.content_types, &unplannable);
            if attempts >= max_attempts || candidates.is_empty() {
                tracing::warn!(
                    %batch_id,
                    requested = batch_size,
                    produced = drafts.len(),
                    attempts,
                    unplannable = unplannable.len(),
                    "top-up exhausted"
                );
                return Err(EngineError::BatchIncomplete {
                    requested: batch_size,
                    produced: drafts.len(),
                });
            }
            let take = (batch_size - drafts.len()).min(max_attempts - attempts);
            attempts += take;
            let extra: Vec<Slot> = (0..take)
                .map(|_| random_slot(rng, &candidates, request.platforms))
                .collect();
            tracing::debug!(%batch_id, slots = take, "topping up skipped slots");
            drafts.extend(self.fill_slots(rng, request, &extra, &mut unplannable).await);
        }

        let elapsed = started.elapsed().as_secs_f64();
        #[allow(clippy::cast_precision_loss)]
        let generation_time = elapsed / batch_size as f64;
        let created_at = Utc::now();

        let suggestions: Vec<Suggestion> = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| Suggestion {
                id: Uuid::new_v4(),
                batch_id,
                content_type: draft.content_type,
                platform: draft.platform,
                business_name: request.briefing.business_name.clone(),
                theme: draft.generated.theme,
                template_format: draft.generated.template_format.to_string(),
                full_text: draft.optimized.full_text,
                hashtags: draft.optimized.hashtags,
                call_to_action: draft.optimized.call_to_action,
                character_count: draft.optimized.character_count,
                within_limits: draft.optimized.within_limits,
                engagement_score: draft.optimized.engagement.score,
                estimated_reach: draft.optimized.engagement.estimated_reach,
                estimated_interactions: draft.optimized.engagement.estimated_interactions,
                status: SuggestionStatus::PendingReview,
                generation_time,
                creativity_level: request.creativity,
                used_fallback: draft.generated.used_fallback,
                suggested_post_time: profile(draft.platform)
                    .posting_time(index)
                    .map(str::to_string),
                created_at,
            })
            .collect();

        let fallbacks = suggestions.iter().filter(|s| s.used_fallback).count();
        tracing::info!(
            %batch_id,
            count = suggestions.len(),
            fallbacks,
            top_up_attempts = attempts,
            elapsed_secs = elapsed,
            "batch generated"
        );

        Ok(suggestions)
    }

    /// Plan, acquire, and pack `slots`, returning drafts in slot order.
    /// Skipped slots are simply absent from the result; content types that
    /// failed to plan are added to `unplannable`.
    async fn fill_slots<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        request: &BatchRequest<'_>,
        slots: &[Slot],
        unplannable: &mut HashSet<ContentType>,
    ) -> Vec<Draft> {
        let briefing = request.briefing;

        let plans: Vec<_> = slots
            .iter()
            .filter_map(|slot| {
                match self.generator.plan(
                    rng,
                    slot.content_type,
                    slot.platform,
                    briefing,
                    None,
                    request.preferences,
                ) {
                    Ok(plan) => Some(plan),
                    Err(e) => {
                        if matches!(
                            e,
                            GenerationError::MissingTemplate(_) | GenerationError::MissingTheme(_)
                        ) {
                            unplannable.insert(slot.content_type);
                        }
                        tracing::warn!(
                            content_type = %slot.content_type,
                            platform = %slot.platform,
                            error = %e,
                            "skipping slot"
                        );
                        None
                    }
                }
            })
            .collect();

        let texts: Vec<_> = stream::iter(plans.iter())
            .map(|plan| {
                self.generator
                    .acquire_text(plan, briefing, request.creativity)
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut drafts = Vec::with_capacity(plans.len());
        for (plan, text) in plans.iter().zip(texts) {
            let acquired = match text {
                Ok(acquired) => acquired,
                Err(e) if self.generator.fallback_on_provider_error() => {
                    tracing::warn!(
                        content_type = %plan.content_type,
                        platform = %plan.platform,
                        provider_error = %e,
                        "text generation failed, using fallback"
                    );
                    AcquiredText::fallback(plan, briefing)
                }
                Err(e) => {
                    tracing::warn!(
                        content_type = %plan.content_type,
                        platform = %plan.platform,
                        provider_error = %e,
                        "text generation failed, skipping slot"
                    );
                    continue;
                }
            };

            let generated = finish(rng, plan, briefing, acquired);
            let optimized = optimize(rng, &generated.raw, profile(plan.platform));
            tracing::debug!(
                content_type = %plan.content_type,
                platform = %plan.platform,
                format = generated.template_format,
                chars = optimized.character_count,
                score = optimized.engagement.score,
                platform_fit = profile(plan.platform).prefers(plan.content_type),
                "slot filled"
            );
            drafts.push(Draft {
                content_type: plan.content_type,
                platform: plan.platform,
                generated,
                optimized,
            });
        }
        drafts
    }
}

/// Expand an allocation into slots in content-type order, assigning
/// platforms round-robin with one running index across all types.
fn assign_slots(allocation: &Allocation, platforms: &[Platform]) -> Vec<Slot> {
    allocation
        .iter()
        .flat_map(|(content_type, count)| std::iter::repeat_n(content_type, count))
        .enumerate()
        .map(|(i, content_type)| Slot {
            content_type,
            platform: platforms[i % platforms.len()],
        })
        .collect()
}

fn random_slot<R: Rng + ?Sized>(
    rng: &mut R,
    content_types: &[ContentType],
    platforms: &[Platform],
) -> Slot {
    Slot {
        content_type: content_types[rng.random_range(0..content_types.len())],
        platform: platforms[rng.random_range(0..platforms.len())],
    }
}

/// Requested content types still worth drawing for top-up, in request order.
fn top_up_candidates(
    content_types: &[ContentType],
    unplannable: &HashSet<ContentType>,
) -> Vec<ContentType> {
    content_types
        .iter()
        .copied()
        .filter(|ct| !unplannable.contains(ct))
        .collect()
}

/// Upper bound on top-up slots tried for a batch of `batch_size`.
fn top_up_limit(batch_size: usize) -> usize {
    batch_size * 4 + 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platforms_round_robin_across_content_types() {
        // Even split of 5 over two types: 3 then 2.
        let allocation = allocate(
            &std::collections::HashMap::new(),
            5,
            &[ContentType::Educational, ContentType::Promotional],
        )
        .unwrap();
        let slots = assign_slots(&allocation, &[Platform::Twitter, Platform::Linkedin]);
        let platforms: Vec<Platform> = slots.iter().map(|s| s.platform).collect();
        assert_eq!(
            platforms,
            vec![
                Platform::Twitter,
                Platform::Linkedin,
                Platform::Twitter,
                Platform::Linkedin,
                Platform::Twitter,
            ]
        );
        assert_eq!(slots[2].content_type, ContentType::Educational);
        assert_eq!(slots[3].content_type, ContentType::Promotional);
    }

    #[test]
    fn top_up_limit_grows_with_batch() {
        assert_eq!(top_up_limit(1), 12);
        assert_eq!(top_up_limit(20), 88);
    }

    #[test]
    fn random_slot_draws_from_requested_lists() {
        use rand::SeedableRng;

        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let types = [ContentType::Inspirational];
        let platforms = [Platform::Tiktok, Platform::Facebook];
        for _ in 0..20 {
            let slot = random_slot(&mut rng, &types, &platforms);
            assert_eq!(slot.content_type, ContentType::Inspirational);
            assert!(platforms.contains(&slot.platform));
        }
    }

    #[test]
    fn top_up_skips_unplannable_types() {
        let types = [
            ContentType::Promotional,
            ContentType::Educational,
            ContentType::Inspirational,
        ];
        let unplannable = HashSet::from([ContentType::Promotional]);
        assert_eq!(
            top_up_candidates(&types, &unplannable),
            vec![ContentType::Educational, ContentType::Inspirational]
        );

        let all: HashSet<_> = types.into_iter().collect();
        assert!(top_up_candidates(&types, &all).is_empty());
    }

    #[test]
    fn concurrency_floor_is_one() {
        let orchestrator =
            BatchOrchestrator::new(SuggestionGenerator::default()).with_max_concurrent(0);
        assert_eq!(orchestrator.max_concurrent(), 1);
    }
}
