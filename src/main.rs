use anyhow::Result;
use clap::Parser;
use tracing::info;

use imagegrab::{Config, Downloader, HttpClient};

#[derive(Parser)]
#[command(name = "imagegrab")]
#[command(about = "Download every image referenced by a web page")]
#[command(version)]
struct Cli {
    /// Optional TOML file overriding the built-in target site and output folder
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    info!("Target: {} -> {}/", config.target_url, config.output_folder);

    let client = HttpClient::new(&config)?;
    let downloader = Downloader::new(config, client);
    let summary = downloader.run().await?;

    info!(
        "Run finished ({}): {} saved, {} failed",
        summary.outcome,
        summary.downloaded(),
        summary.failed()
    );

    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("imagegrab={}", level))
        .with_target(false)
        .init();

    Ok(())
}
