//! feedmirror CLI
//!
//! Local execution entry point, meant to be run periodically (cron, CI
//! schedule). Each invocation processes one feed snapshot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use feedmirror::{
    config,
    error::Result,
    pipeline::{self, ForwardContext},
    services::{DocumentSanitizer, HttpFetcher, TelegramChannel},
    storage::{CheckpointStore, LocalCheckpoint},
    utils::http,
};

/// feedmirror - RSS to Telegram forwarder
#[derive(Parser, Debug)]
#[command(name = "feedmirror", version, about = "Mirror RSS feed items into a Telegram channel")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Path to the checkpoint file
    #[arg(long, default_value = "last.txt")]
    checkpoint: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Forward new feed items and update the checkpoint
    Run,

    /// Show what would be forwarded without sending anything
    Preview,

    /// Remove clickable links from a local PDF
    Sanitize {
        /// Input PDF
        input: PathBuf,
        /// Output PDF
        output: PathBuf,
    },

    /// Validate configuration
    Validate,

    /// Show the current checkpoint
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = LocalCheckpoint::new(&cli.checkpoint);

    match cli.command {
        Command::Run => {
            let config = config::load_all(&cli.config)?;
            let client = http::create_async_client(&config.delivery)?;
            let fetcher = HttpFetcher::new(client.clone());
            let channel = TelegramChannel::new(client, &config);
            let ctx = ForwardContext {
                config: &config,
                fetcher: &fetcher,
                channel: &channel,
            };

            let summary = pipeline::run_forwarder(&ctx, &store).await?;
            log::info!(
                "Run complete: {} in feed, {} new, {} forwarded, {} skipped ({} ms)",
                summary.feed_count,
                summary.new_count,
                summary.forwarded,
                summary.skipped.len(),
                (summary.end_time - summary.start_time).num_milliseconds()
            );
        }

        Command::Preview => {
            let config = config::load_with_env(&cli.config);
            let client = http::create_async_client(&config.delivery)?;
            let fetcher = HttpFetcher::new(client);

            let checkpoint = store.read_last().await?;
            let items = pipeline::fetch_items(&config, &fetcher).await?;
            let diff = pipeline::calculate_diff(&items, &checkpoint);

            log::info!(
                "{} of {} items would be forwarded",
                diff.change_count(),
                items.len()
            );
            for item in &diff.new_items {
                let media = match (&item.media_url, item.media_kind) {
                    (Some(url), Some(kind)) => format!("{kind:?}: {url}"),
                    (Some(url), None) => format!("unsupported: {url}"),
                    _ => "text only".to_string(),
                };
                println!("── {} [{}]", item.identifier, media);
                println!("{}\n", pipeline::compose_message(&item.text, &config.message));
            }
        }

        Command::Sanitize { input, output } => {
            let bytes = tokio::fs::read(&input).await?;
            let (safe, report) = DocumentSanitizer::new().sanitize_with_report(&bytes)?;
            tokio::fs::write(&output, safe).await?;

            log::info!(
                "Sanitized {} -> {}: {} links removed, {} actions removed, {} malformed skipped",
                input.display(),
                output.display(),
                report.links_removed,
                report.actions_removed,
                report.malformed_skipped
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            let config = config::load_with_env(&cli.config);
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (feed: {})", config.feed.url);
        }

        Command::Info => {
            log::info!("Checkpoint file: {}", store.path().display());

            let checkpoint = store.read_last().await?;
            if checkpoint.is_empty() {
                log::info!("No checkpoint yet; the next run forwards the whole feed.");
            } else {
                log::info!("Last forwarded: {}", checkpoint.as_str());
            }
        }
    }

    Ok(())
}
