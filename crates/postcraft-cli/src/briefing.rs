//! `briefing` sub-commands: read-only checks on the briefing file.

use std::path::PathBuf;

use clap::Subcommand;
use postcraft_core::{AppConfig, ContentType};

/// Sub-commands available under `briefing`.
#[derive(Debug, Subcommand)]
pub enum BriefingCommands {
    /// Load and validate the briefing, reporting the first problem found
    Validate {
        /// Briefing file (defaults to `POSTCRAFT_BRIEFING_PATH`)
        #[arg(long)]
        briefing: Option<PathBuf>,
    },
    /// Print the briefing's themes and content mix
    Show {
        /// Briefing file (defaults to `POSTCRAFT_BRIEFING_PATH`)
        #[arg(long)]
        briefing: Option<PathBuf>,
    },
}

/// # Errors
///
/// Returns an error if the briefing file cannot be read, parsed, or validated.
pub(crate) fn run_briefing(config: &AppConfig, command: &BriefingCommands) -> anyhow::Result<()> {
    match command {
        BriefingCommands::Validate { briefing } => {
            let path = briefing.as_ref().unwrap_or(&config.briefing_path);
            let b = postcraft_core::load_briefing(path)?;
            println!(
                "{}: ok ({} themes, {} content types in mix)",
                path.display(),
                b.themes.len(),
                b.content_mix.len()
            );
        }
        BriefingCommands::Show { briefing } => {
            let path = briefing.as_ref().unwrap_or(&config.briefing_path);
            let b = postcraft_core::load_briefing(path)?;
            println!("{} ({})", b.business_name, b.industry);
            println!("Audience: {}", b.target_audience);
            println!("Voice:    {}", b.brand_voice);
            println!();
            println!("Themes:");
            for theme in &b.themes {
                let fits = if theme.suitable_for.is_empty() {
                    "any".to_string()
                } else {
                    theme
                        .suitable_for
                        .iter()
                        .map(|ct| ct.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                println!("  - {} [{fits}]", theme.name);
            }
            println!();
            println!("Content mix:");
            for ct in ContentType::ALL {
                if let Some(pct) = b.content_mix.get(&ct) {
                    println!("  {:<18} {pct:>3}%", ct.as_str());
                }
            }
        }
    }
    Ok(())
}
