//! Content suggestion engine.
//!
//! Turns a business briefing into a batch of platform-ready post drafts:
//! the content mix is allocated across content types, each slot gets a
//! template, theme, and prompt, text comes from a [`TextGenerator`] (or the
//! local fallback), and the result is packed to each platform's limits and
//! scored.

pub mod allocator;
pub mod catalog;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod optimizer;
pub mod pipeline;
pub mod platforms;
pub mod provider;
pub mod scorer;

pub use allocator::{allocate, Allocation};
pub use catalog::{templates_for, Template, TEMPLATES};
pub use error::{EngineError, GenerationError, ProviderError};
pub use generator::{
    fallback_content, GeneratedContent, GenerationPreferences, SlotPlan, SuggestionGenerator,
};
pub use optimizer::{optimize, OptimizedContent};
pub use pipeline::{BatchOrchestrator, BatchRequest};
pub use platforms::{profile, PlatformProfile};
pub use provider::{OpenAiCompatibleClient, TextGenerator};
pub use scorer::{engagement_score, EngagementEstimate};
