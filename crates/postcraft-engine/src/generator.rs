//! Single-suggestion generation: template and theme selection, prompt
//! construction, text acquisition, and parsing into [`RawContent`].

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use postcraft_core::{
    Briefing, ContentCategory, ContentType, CreativityLevel, Platform, RawContent, Theme,
};
use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;

use crate::catalog::{templates_for, Template, TEMPLATES};
use crate::error::{GenerationError, ProviderError};
use crate::fallback::fallback_text;
use crate::platforms::profile;
use crate::provider::TextGenerator;

const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const TITLE_MIN_CHARS: usize = 10;
const TITLE_MAX_CHARS: usize = 99;

const GENERIC_HASHTAGS: &[&str] = &[
    "#SmallBusiness",
    "#ContentCreation",
    "#SocialMedia",
    "#Community",
    "#Growth",
];

const ENGAGEMENT_CTAS: &[&str] = &[
    "What's your take? Share it in the comments!",
    "Save this post for later.",
    "Tag someone who needs to see this.",
];

const CONVERSION_CTAS: &[&str] = &[
    "Shop now through the link in our bio.",
    "Get started today. Link in bio.",
    "Book your spot before it's gone.",
];

const COMMUNITY_CTAS: &[&str] = &[
    "Follow along for more.",
    "Join the conversation below.",
    "Share your story with us!",
];

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid hashtag regex"));

/// Caller preferences that shape template and theme choice.
#[derive(Debug, Clone)]
pub struct GenerationPreferences {
    /// Preferred template format per content type. Unknown formats are ignored.
    pub preferred_formats: HashMap<ContentType, String>,
    /// Substitute a "General" theme when the briefing has none.
    pub allow_general_theme: bool,
}

impl Default for GenerationPreferences {
    fn default() -> Self {
        Self {
            preferred_formats: HashMap::new(),
            allow_general_theme: true,
        }
    }
}

/// Everything decided for one slot before any text is requested.
#[derive(Debug, Clone)]
pub struct SlotPlan {
    pub content_type: ContentType,
    pub platform: Platform,
    pub template: &'static Template,
    pub theme: Theme,
    pub prompt: String,
}

/// Text obtained for a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredText {
    pub text: String,
    pub used_fallback: bool,
}

impl AcquiredText {
    /// Canned text for `plan`, used when no provider is configured or the
    /// provider call failed.
    #[must_use]
    pub fn fallback(plan: &SlotPlan, briefing: &Briefing) -> Self {
        Self {
            text: fallback_text(plan.content_type, &plan.theme, briefing),
            used_fallback: true,
        }
    }
}

/// Output of a complete single-suggestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent {
    pub raw: RawContent,
    pub template_format: &'static str,
    pub theme: String,
    pub used_fallback: bool,
}

/// Produces raw content for individual suggestions.
#[derive(Clone)]
pub struct SuggestionGenerator {
    provider: Option<Arc<dyn TextGenerator>>,
    catalog: &'static [Template],
    max_tokens: u32,
    timeout: Duration,
    fallback_on_provider_error: bool,
}

impl Default for SuggestionGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SuggestionGenerator {
    /// Without a provider, all text comes from the deterministic fallback.
    #[must_use]
    pub fn new(provider: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            provider,
            catalog: TEMPLATES,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fallback_on_provider_error: true,
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: &'static [Template]) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a failed provider call is retried once with the local fallback.
    #[must_use]
    pub fn with_fallback_on_provider_error(mut self, enabled: bool) -> Self {
        self.fallback_on_provider_error = enabled;
        self
    }

    #[must_use]
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    #[must_use]
    pub fn fallback_on_provider_error(&self) -> bool {
        self.fallback_on_provider_error
    }

    /// Generate raw content for one suggestion.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingTemplate`] / [`GenerationError::MissingTheme`]
    /// when the slot cannot be planned, and [`GenerationError::Provider`] when
    /// the provider call fails. No fallback retry happens here; that is the
    /// batch pipeline's decision.
    #[allow(clippy::too_many_arguments)]
    pub async fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        content_type: ContentType,
        platform: Platform,
        briefing: &Briefing,
        theme: Option<&Theme>,
        preferences: &GenerationPreferences,
        creativity: CreativityLevel,
    ) -> Result<GeneratedContent, GenerationError> {
        let plan = self.plan(rng, content_type, platform, briefing, theme, preferences)?;
        let acquired = self.acquire_text(&plan, briefing, creativity).await?;
        Ok(finish(rng, &plan, briefing, acquired))
    }

    /// Steps 1–3: pick template, theme, and prompt pattern, then build the prompt.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingTemplate`] if the catalog has no
    /// format for `content_type`, or [`GenerationError::MissingTheme`] if no
    /// theme is available and the general theme is disallowed.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        content_type: ContentType,
        platform: Platform,
        briefing: &Briefing,
        theme: Option<&Theme>,
        preferences: &GenerationPreferences,
    ) -> Result<SlotPlan, GenerationError> {
        let preferred = preferences
            .preferred_formats
            .get(&content_type)
            .map(String::as_str);
        let template = select_template(rng, self.catalog, content_type, preferred)?;

        let theme = match theme {
            Some(t) => t.clone(),
            None => select_theme(rng, briefing, content_type, preferences.allow_general_theme)?,
        };

        let pattern = template
            .prompts
            .choose(rng)
            .copied()
            .unwrap_or_default();
        let prompt = build_prompt(template, pattern, &theme, briefing, platform);

        Ok(SlotPlan {
            content_type,
            platform,
            template,
            theme,
            prompt,
        })
    }

    /// Step 4: call the provider, or use the fallback when none is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider fails or exceeds the
    /// per-call timeout.
    pub async fn acquire_text(
        &self,
        plan: &SlotPlan,
        briefing: &Briefing,
        creativity: CreativityLevel,
    ) -> Result<AcquiredText, ProviderError> {
        let Some(provider) = &self.provider else {
            return Ok(AcquiredText::fallback(plan, briefing));
        };

        let call = provider.generate_text(&plan.prompt, self.max_tokens, creativity.temperature());
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(text)) => Ok(AcquiredText {
                text,
                used_fallback: false,
            }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ProviderError::Timeout {
                after: self.timeout,
            }),
        }
    }
}

/// Step 5 for an acquired text: parse it, choosing a CTA with `rng` unless
/// the text came from the fallback.
pub(crate) fn finish<R: Rng + ?Sized>(
    rng: &mut R,
    plan: &SlotPlan,
    briefing: &Briefing,
    acquired: AcquiredText,
) -> GeneratedContent {
    let hashtag_limit = profile(plan.platform).hashtag_limit;
    let raw = if acquired.used_fallback {
        fallback_content(plan.content_type, &plan.theme, briefing, plan.platform)
    } else {
        let cta = pick_cta(rng, plan.content_type);
        parse_generated_text(&acquired.text, &plan.theme, briefing, hashtag_limit, cta)
    };
    GeneratedContent {
        raw,
        template_format: plan.template.format,
        theme: plan.theme.name.clone(),
        used_fallback: acquired.used_fallback,
    }
}

/// Pure fallback content. Identical inputs give identical output; the CTA is
/// the first entry of the content type's list.
#[must_use]
pub fn fallback_content(
    content_type: ContentType,
    theme: &Theme,
    briefing: &Briefing,
    platform: Platform,
) -> RawContent {
    let text = fallback_text(content_type, theme, briefing);
    let cta = cta_options(content_type)[0];
    parse_generated_text(&text, theme, briefing, profile(platform).hashtag_limit, cta)
}

/// Pick a template: the preferred format if the catalog has it, otherwise a
/// uniformly random one.
///
/// # Errors
///
/// Returns [`GenerationError::MissingTemplate`] if the catalog has no
/// template for `content_type`.
pub fn select_template<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &'static [Template],
    content_type: ContentType,
    preferred_format: Option<&str>,
) -> Result<&'static Template, GenerationError> {
    let available = templates_for(catalog, content_type);
    if let Some(format) = preferred_format {
        if let Some(t) = available.iter().copied().find(|t| t.format == format) {
            return Ok(t);
        }
        tracing::debug!(%content_type, format, "preferred format not in catalog");
    }
    available
        .choose(rng)
        .copied()
        .ok_or(GenerationError::MissingTemplate(content_type))
}

/// Pick a theme suitable for `content_type`, falling back to any theme and
/// then to the general theme.
///
/// # Errors
///
/// Returns [`GenerationError::MissingTheme`] if the briefing has no themes
/// and `allow_general` is `false`.
pub fn select_theme<R: Rng + ?Sized>(
    rng: &mut R,
    briefing: &Briefing,
    content_type: ContentType,
    allow_general: bool,
) -> Result<Theme, GenerationError> {
    let suitable = briefing.themes_for(content_type);
    if let Some(theme) = suitable.choose(rng) {
        return Ok((*theme).clone());
    }
    if let Some(theme) = briefing.themes.choose(rng) {
        return Ok(theme.clone());
    }
    if allow_general {
        return Ok(Theme::general(&briefing.industry));
    }
    Err(GenerationError::MissingTheme(content_type))
}

/// Assemble the prompt in fixed order: platform, content type and format,
/// theme, tone, structure, instruction pattern, requirements.
#[must_use]
pub fn build_prompt(
    template: &Template,
    pattern: &str,
    theme: &Theme,
    briefing: &Briefing,
    platform: Platform,
) -> String {
    let instruction = Template::render_pattern(pattern, theme, briefing);
    let tone = &briefing.brand_voice;
    [
        format!("Platform: {platform}"),
        format!(
            "Content type: {} ({})",
            template.content_type.label(),
            template.format
        ),
        format!("Theme: {} - {}", theme.name, theme.description),
        format!("Brand tone: {tone}"),
        format!("Structure: {}", template.structure()),
        format!("Instructions: {instruction}"),
        String::new(),
        "Requirements:".to_string(),
        format!("- Write in a {tone} tone"),
        format!("- Focus on the theme \"{}\"", theme.name),
        format!("- Follow the {} format", template.format),
        format!("- Optimize for {platform}"),
        "- Include engaging elements".to_string(),
        "- Start with a title line, then the body".to_string(),
    ]
    .join("\n")
}

/// Parse generated text into [`RawContent`].
///
/// The title is the first non-empty line of 10 to 99 characters (else the
/// first line as-is); the body is every other non-empty line, separated by
/// blank lines.
#[must_use]
pub fn parse_generated_text(
    text: &str,
    theme: &Theme,
    briefing: &Briefing,
    hashtag_limit: usize,
    call_to_action: &str,
) -> RawContent {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let title_idx = lines
        .iter()
        .position(|l| (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&clean_title(l).chars().count()));

    let (title, body_lines): (String, Vec<&str>) = match title_idx {
        Some(idx) => (
            clean_title(lines[idx]).to_string(),
            lines
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, l)| *l)
                .collect(),
        ),
        None => match lines.split_first() {
            Some((first, rest)) => ((*first).to_string(), rest.to_vec()),
            None => (String::new(), Vec::new()),
        },
    };

    RawContent {
        title,
        body: body_lines.join("\n\n"),
        hashtags: build_hashtags(&theme.name, &briefing.industry, hashtag_limit),
        call_to_action: call_to_action.to_string(),
    }
}

/// Strip markdown heading/emphasis marks, quotes, and a `Title:` label.
fn clean_title(line: &str) -> &str {
    let trimmed = line.trim_matches(|c: char| c == '#' || c == '*' || c == '"' || c.is_whitespace());
    trimmed
        .strip_prefix("Title:")
        .map_or(trimmed, str::trim_start)
}

/// Hashtags from the theme, the industry, then a generic pool; unique
/// ignoring case and capped at `limit`.
#[must_use]
pub fn build_hashtags(theme_name: &str, industry: &str, limit: usize) -> Vec<String> {
    let candidates = [to_hashtag(theme_name), to_hashtag(industry)]
        .into_iter()
        .flatten()
        .chain(GENERIC_HASHTAGS.iter().map(|t| (*t).to_string()));

    let mut tags: Vec<String> = Vec::new();
    for tag in candidates {
        if tags.len() >= limit {
            break;
        }
        if !tags.iter().any(|t| t.to_lowercase() == tag.to_lowercase()) {
            tags.push(tag);
        }
    }
    tags
}

/// `"cold brew & co."` → `"#ColdBrewCo"`. Letters and digits of any script
/// are kept. `None` when nothing alphanumeric remains.
fn to_hashtag(phrase: &str) -> Option<String> {
    let camel: String = NON_ALNUM
        .split(phrase)
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    if camel.is_empty() {
        None
    } else {
        Some(format!("#{camel}"))
    }
}

fn cta_options(content_type: ContentType) -> &'static [&'static str] {
    match content_type.category() {
        ContentCategory::Engagement => ENGAGEMENT_CTAS,
        ContentCategory::Conversion => CONVERSION_CTAS,
        ContentCategory::Community => COMMUNITY_CTAS,
    }
}

/// Uniformly random CTA from the content type's category list.
pub fn pick_cta<R: Rng + ?Sized>(rng: &mut R, content_type: ContentType) -> &'static str {
    let options = cta_options(content_type);
    options.choose(rng).copied().unwrap_or(options[0])
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
