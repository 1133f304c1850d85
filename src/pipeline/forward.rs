// src/pipeline/forward.rs

//! Forwarding pipeline.
//!
//! Fetch the feed, compute the diff against the checkpoint, and deliver each
//! new item oldest-first. The checkpoint is only advanced in the returned
//! summary; persisting it is the caller's job, so a failed run leaves the
//! stored value untouched and the next run retries the same batch.

use std::time::Duration;

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{
    Checkpoint, Config, DocumentFailurePolicy, FeedItem, MediaKind, MessageConfig, RunSummary,
};
use crate::pipeline::diff::calculate_diff;
use crate::services::{Channel, DocumentSanitizer, Fetcher, ItemExtractor};
use crate::storage::CheckpointStore;
use crate::utils::collapse_blank_lines;

/// Collaborators needed for one run.
#[derive(Clone, Copy)]
pub struct ForwardContext<'a> {
    pub config: &'a Config,
    pub fetcher: &'a dyn Fetcher,
    pub channel: &'a dyn Channel,
}

enum Outcome {
    Sent,
    Skipped,
}

/// Wrap an item's text in the configured header and footer.
pub fn compose_message(text: &str, message: &MessageConfig) -> String {
    let out = format!(
        "{}\n\n{}\n\n{}\n{}",
        message.header, text, message.separator, message.follow_line
    );
    collapse_blank_lines(out.trim()).trim().to_string()
}

/// Download and parse the configured feed.
pub async fn fetch_items(config: &Config, fetcher: &dyn Fetcher) -> Result<Vec<FeedItem>> {
    let timeout = Duration::from_secs(config.delivery.feed_timeout_secs);
    let xml = fetcher.fetch_text(&config.feed.url, timeout).await?;
    let extractor = ItemExtractor::new();
    if !extractor.is_feed_document(&xml) {
        return Err(AppError::feed(format!(
            "{} did not return an RSS document",
            config.feed.url
        )));
    }
    let items = extractor.parse_feed(&xml);
    log::info!("Parsed {} items from {}", items.len(), config.feed.url);
    Ok(items)
}

/// Deliver every item newer than `checkpoint`.
///
/// Collaborator failures abort the run immediately. The returned summary
/// carries the checkpoint to persist.
pub async fn forward(
    items: &[FeedItem],
    checkpoint: Checkpoint,
    ctx: &ForwardContext<'_>,
) -> Result<RunSummary> {
    let start_time = Utc::now();
    let diff = calculate_diff(items, &checkpoint);
    let delay = Duration::from_millis(ctx.config.delivery.delay_ms);
    let sanitizer = DocumentSanitizer::new();

    let mut forwarded = 0;
    let mut skipped = Vec::new();
    let mut next_checkpoint = checkpoint;

    for (idx, item) in diff.new_items.iter().enumerate() {
        if idx > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match deliver(item, ctx, &sanitizer).await? {
            Outcome::Sent => {
                forwarded += 1;
                log::info!("Forwarded {}", item.identifier);
                if item.identifier.is_empty() {
                    log::warn!("Forwarded an item without identifier; checkpoint not advanced");
                } else {
                    next_checkpoint = Checkpoint::new(item.identifier.as_str());
                }
            }
            Outcome::Skipped => skipped.push(item.identifier.clone()),
        }
    }

    Ok(RunSummary {
        start_time,
        end_time: Utc::now(),
        feed_count: items.len(),
        new_count: diff.change_count(),
        forwarded,
        skipped,
        checkpoint: next_checkpoint,
    })
}

/// Full run: read the checkpoint, fetch, forward, and persist.
pub async fn run_forwarder(
    ctx: &ForwardContext<'_>,
    store: &dyn CheckpointStore,
) -> Result<RunSummary> {
    let checkpoint = store.read_last().await?;
    if checkpoint.is_empty() {
        log::info!("No checkpoint found; forwarding every item in the feed");
    } else {
        log::info!("Last forwarded: {}", checkpoint.as_str());
    }

    let items = fetch_items(ctx.config, ctx.fetcher).await?;
    if items.is_empty() {
        log::warn!("No items found in feed");
    }

    let summary = forward(&items, checkpoint, ctx).await?;
    if summary.should_persist() {
        store.write_last(&summary.checkpoint).await?;
        log::info!(
            "Posted {} items. Last: {}",
            summary.forwarded,
            summary.checkpoint.as_str()
        );
    } else if summary.new_count == 0 {
        log::info!("No new posts");
    }

    if !summary.skipped.is_empty() {
        log::warn!("Skipped {} items: {:?}", summary.skipped.len(), summary.skipped);
    }

    Ok(summary)
}

async fn deliver(
    item: &FeedItem,
    ctx: &ForwardContext<'_>,
    sanitizer: &DocumentSanitizer,
) -> Result<Outcome> {
    let config = ctx.config;
    let message = compose_message(&item.text, &config.message);

    match item.media() {
        Some((url, MediaKind::Image)) => {
            let timeout = Duration::from_secs(config.delivery.image_timeout_secs);
            let image = ctx.fetcher.fetch_bytes(url, timeout).await?;
            ctx.channel.send_photo(image, &message).await?;
        }
        Some((url, MediaKind::Pdf)) => {
            let timeout = Duration::from_secs(config.delivery.document_timeout_secs);
            let pdf = ctx.fetcher.fetch_bytes(url, timeout).await?;
            let safe_pdf = match sanitizer.sanitize(&pdf) {
                Ok(bytes) => bytes,
                Err(e) if config.delivery.on_document_error == DocumentFailurePolicy::Skip => {
                    log::error!("Skipping {}: cannot sanitize {}: {}", item.identifier, url, e);
                    return Ok(Outcome::Skipped);
                }
                Err(e) => return Err(e),
            };
            ctx.channel
                .send_document(safe_pdf, &config.message.document_filename, &message)
                .await?;
        }
        None => {
            if let Some(url) = &item.media_url {
                log::debug!(
                    "Unsupported media for {}: {}; sending text only",
                    item.identifier,
                    url
                );
            }
            ctx.channel.send_text(&message).await?;
        }
    }

    Ok(Outcome::Sent)
}
