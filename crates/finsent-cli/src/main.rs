mod clean;
mod collect;
mod score;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "finsent")]
#[command(about = "Financial news collection and sentiment scoring")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch new articles for every configured company
    Collect {
        /// Restrict collection to one company (name or ticker)
        #[arg(long)]
        company: Option<String>,

        /// Print the companies and search window without fetching
        #[arg(long)]
        dry_run: bool,
    },
    /// Merge, deduplicate and normalise all raw articles
    Clean,
    /// Score a cleaned dataset and write the sentiment file
    Score {
        /// Cleaned CSV to score (defaults to the last `clean` output)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Destination CSV (defaults to `cleaned_data/news_with_sentiment.csv`)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Score records on all cores
        #[arg(long)]
        parallel: bool,
    },
    /// Collect, clean and score in one go
    Run {
        /// Restrict collection to one company (name or ticker)
        #[arg(long)]
        company: Option<String>,

        /// Score records on all cores
        #[arg(long)]
        parallel: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = finsent_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Collect { company, dry_run }) => {
            collect::run_collect(&config, company.as_deref(), dry_run).await?;
        }
        Some(Commands::Clean) => {
            clean::run_clean(&config)?;
        }
        Some(Commands::Score {
            input,
            output,
            parallel,
        }) => {
            let input = input.unwrap_or_else(|| clean::cleaned_path(&config));
            let articles = finsent_store::read_articles(&input)?;
            let lexicon = score::load_lexicon(&config).await?;
            let output = output.unwrap_or_else(|| score::scored_path(&config));
            score::run_score(&lexicon, articles, &output, parallel)?;
        }
        Some(Commands::Run { company, parallel }) => {
            run_pipeline(&config, company.as_deref(), parallel).await?;
        }
        None => {
            println!("finsent: pass --help to list commands");
        }
    }

    Ok(())
}

/// Collect → clean → score.
///
/// The lexicon is loaded first so a missing resource stops the run before
/// any network or file work happens.
async fn run_pipeline(
    config: &finsent_core::AppConfig,
    company: Option<&str>,
    parallel: bool,
) -> anyhow::Result<()> {
    tracing::info!("starting news pipeline");
    let lexicon = score::load_lexicon(config).await?;

    collect::run_collect(config, company, false).await?;

    let cleaned = clean::run_clean(config)?;
    if cleaned.is_empty() {
        tracing::warn!("no data to analyze; exiting pipeline");
        return Ok(());
    }

    score::run_score(&lexicon, cleaned, &score::scored_path(config), parallel)?;
    tracing::info!("pipeline complete");
    Ok(())
}
