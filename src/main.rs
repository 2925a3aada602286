use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use docsum::{
    config::Config,
    logging,
    summarizer::{Summarizer, SummaryLength},
};

#[derive(Parser)]
#[command(
    name = "docsum",
    about = "Summarize a document, falling back from cloud to local to extractive tiers"
)]
struct Cli {
    /// File containing the extracted document text; reads stdin when omitted.
    file: Option<PathBuf>,
    /// Desired summary length band.
    #[arg(long, value_enum, default_value_t = SummaryLength::Medium)]
    length: SummaryLength,
    /// Print the full result (provider, degraded flag, attempts) as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let text = read_input(cli.file.as_deref())?;

    let summarizer = Summarizer::from_config(&config);
    let result = summarizer
        .summarize(&text, cli.length)
        .await
        .context("Summarization failed")?;

    tracing::info!(
        provider = %result.provider_used,
        degraded = result.degraded,
        attempts = result.attempts.len(),
        "Summarization finished"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.summary_text);
    }

    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}
