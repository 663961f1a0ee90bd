mod briefing;
mod generate;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::briefing::BriefingCommands;
use crate::generate::GenerateArgs;

#[derive(Debug, Parser)]
#[command(name = "postcraft")]
#[command(about = "Generate social media content suggestions from a business briefing")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a batch of content suggestions
    Generate(GenerateArgs),
    /// Inspect the briefing file
    Briefing {
        #[command(subcommand)]
        command: BriefingCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = postcraft_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Generate(args)) => generate::run_generate(&config, &args).await?,
        Some(Commands::Briefing { command }) => briefing::run_briefing(&config, &command)?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
