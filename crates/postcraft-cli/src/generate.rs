//! `generate` command: run one suggestion batch and print it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use postcraft_core::{AppConfig, Briefing, ContentType, CreativityLevel, Platform, Suggestion};
use postcraft_engine::{
    BatchOrchestrator, BatchRequest, GenerationPreferences, OpenAiCompatibleClient,
    SuggestionGenerator, TextGenerator,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Briefing file (defaults to `POSTCRAFT_BRIEFING_PATH`)
    #[arg(long)]
    pub briefing: Option<PathBuf>,

    /// Number of suggestions, clamped to `POSTCRAFT_MAX_BATCH_SIZE`
    #[arg(long, default_value_t = 5)]
    pub batch_size: usize,

    /// Target platform; repeat for several (defaults to all)
    #[arg(long = "platform")]
    pub platforms: Vec<Platform>,

    /// Content type; repeat for several (defaults to the briefing's mix)
    #[arg(long = "content-type")]
    pub content_types: Vec<ContentType>,

    /// conservative, balanced, or creative
    #[arg(long, default_value = "balanced")]
    pub creativity: CreativityLevel,

    /// Preferred template format per content type, e.g. `educational=how_to`
    #[arg(long = "prefer-format", value_parser = parse_format_preference)]
    pub preferred_formats: Vec<(ContentType, String)>,

    /// Seed for reproducible selection and scoring
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print suggestions as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run a batch with the configured provider, or the local fallback when no
/// API key is set.
///
/// # Errors
///
/// Returns an error if the briefing cannot be loaded, the provider client
/// cannot be built, or the batch cannot be completed.
pub(crate) async fn run_generate(config: &AppConfig, args: &GenerateArgs) -> anyhow::Result<()> {
    let path = args.briefing.as_ref().unwrap_or(&config.briefing_path);
    let briefing = postcraft_core::load_briefing(path)?;

    let provider: Option<Arc<dyn TextGenerator>> = match config.llm_api_key.as_deref() {
        Some(key) => Some(Arc::new(OpenAiCompatibleClient::with_base_url(
            key,
            &config.llm_model,
            config.llm_timeout_secs,
            &config.llm_base_url,
        )?)),
        None => {
            tracing::info!("POSTCRAFT_LLM_API_KEY not set; using local fallback text");
            None
        }
    };

    let generator = SuggestionGenerator::new(provider)
        .with_max_tokens(config.llm_max_tokens)
        .with_timeout(Duration::from_secs(config.llm_timeout_secs));
    let orchestrator =
        BatchOrchestrator::new(generator).with_max_concurrent(config.max_concurrent_generations);

    let platforms = if args.platforms.is_empty() {
        Platform::ALL.to_vec()
    } else {
        args.platforms.clone()
    };
    let content_types = if args.content_types.is_empty() {
        default_content_types(&briefing)
    } else {
        args.content_types.clone()
    };
    let preferences = GenerationPreferences {
        preferred_formats: args.preferred_formats.iter().cloned().collect::<HashMap<_, _>>(),
        ..GenerationPreferences::default()
    };

    let batch_size = config.clamp_batch_size(args.batch_size);
    if batch_size != args.batch_size {
        tracing::warn!(
            requested = args.batch_size,
            batch_size,
            "batch size clamped to configured range"
        );
    }

    let request = BatchRequest {
        briefing: &briefing,
        batch_size,
        platforms: &platforms,
        content_types: &content_types,
        preferences: &preferences,
        creativity: args.creativity,
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let suggestions = orchestrator.generate_batch(&mut rng, &request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        print_suggestions(&suggestions);
    }

    Ok(())
}

/// Types weighted in the briefing's mix, in declaration order; every type
/// when the mix carries no weight.
fn default_content_types(briefing: &Briefing) -> Vec<ContentType> {
    let weighted: Vec<ContentType> = ContentType::ALL
        .into_iter()
        .filter(|ct| briefing.content_mix.get(ct).is_some_and(|pct| *pct > 0))
        .collect();
    if weighted.is_empty() {
        ContentType::ALL.to_vec()
    } else {
        weighted
    }
}

fn parse_format_preference(raw: &str) -> Result<(ContentType, String), String> {
    let (content_type, format) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CONTENT_TYPE=FORMAT, got '{raw}'"))?;
    let content_type: ContentType = content_type
        .parse()
        .map_err(|e: postcraft_core::CoreError| e.to_string())?;
    let format = format.trim();
    if format.is_empty() {
        return Err(format!("empty format in '{raw}'"));
    }
    Ok((content_type, format.to_string()))
}

fn print_suggestions(suggestions: &[Suggestion]) {
    for (i, s) in suggestions.iter().enumerate() {
        println!(
            "#{} {} / {} [{}] theme: {}",
            i + 1,
            s.platform,
            s.content_type.label(),
            s.template_format,
            s.theme
        );
        println!(
            "   score {} | reach {} | interactions {} | {} chars{}",
            s.engagement_score,
            s.estimated_reach,
            s.estimated_interactions,
            s.character_count,
            if s.used_fallback { " | fallback" } else { "" }
        );
        if let Some(time) = &s.suggested_post_time {
            println!("   post at {time}");
        }
        println!();
        for line in s.full_text.lines() {
            println!("   {line}");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn briefing(mix: &[(ContentType, u32)]) -> Briefing {
        Briefing {
            business_name: "Harbor Coffee Roasters".to_string(),
            industry: "specialty coffee".to_string(),
            target_audience: String::new(),
            brand_voice: "warm".to_string(),
            themes: Vec::new(),
            content_mix: mix.iter().copied().collect(),
        }
    }

    #[test]
    fn default_types_follow_weighted_mix() {
        let b = briefing(&[
            (ContentType::Promotional, 30),
            (ContentType::Educational, 70),
            (ContentType::Entertaining, 0),
        ]);
        assert_eq!(
            default_content_types(&b),
            vec![ContentType::Educational, ContentType::Promotional]
        );
    }

    #[test]
    fn default_types_cover_everything_without_mix() {
        assert_eq!(default_content_types(&briefing(&[])), ContentType::ALL.to_vec());
    }

    #[test]
    fn format_preference_parses() {
        assert_eq!(
            parse_format_preference("educational=how_to").unwrap(),
            (ContentType::Educational, "how_to".to_string())
        );
    }

    #[test]
    fn format_preference_rejects_bad_input() {
        assert!(parse_format_preference("educational").is_err());
        assert!(parse_format_preference("nonsense=how_to").is_err());
        assert!(parse_format_preference("educational= ").is_err());
    }
}
