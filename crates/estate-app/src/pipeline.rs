use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use estate_config::Config;
use estate_core::{format_message, nearby};
use estate_notify::{Delivery, Notifier};
use estate_scrape::ListingSource;

#[derive(Debug)]
pub struct RunReport {
    /// Sales left after the distance filter
    pub sales: usize,
    pub deliveries: Vec<Delivery>,
}

/// Fetch, filter, format and deliver once
pub async fn run_once(
    config: &Config,
    source: &dyn ListingSource,
    notifiers: &[Box<dyn Notifier>],
    dry_run: bool,
) -> anyhow::Result<RunReport> {
    tracing::info!("Fetching estate sales from {}...", source.page_url());

    let listings = source
        .fetch()
        .await
        .context("Failed to fetch estate sales")?;
    tracing::debug!("{} cards on the page", listings.len());

    let max_miles = config.scrape.max_distance_miles;
    let sales = nearby(listings, max_miles);
    tracing::info!("Found {} sales within {} miles", sales.len(), max_miles);

    let message = format_message(&sales, &config.scrape);
    tracing::info!("Message ({} chars)", message.chars().count());
    println!("{message}");

    let deliveries = if dry_run {
        tracing::info!("Dry run, not sending notifications");
        Vec::new()
    } else {
        deliver(notifiers, &config.subject, &message).await?
    };

    Ok(RunReport {
        sales: sales.len(),
        deliveries,
    })
}

/// Send through every notifier; fails only when all of them failed
pub async fn deliver(
    notifiers: &[Box<dyn Notifier>],
    subject: &str,
    message: &str,
) -> anyhow::Result<Vec<Delivery>> {
    if notifiers.is_empty() {
        tracing::warn!("No notification channels configured, nothing sent");
        return Ok(Vec::new());
    }

    let mut deliveries = Vec::with_capacity(notifiers.len());
    let mut last_error = None;

    for notifier in notifiers {
        match notifier.notify(subject, message).await {
            Ok(delivery) => {
                tracing::info!(
                    "{} notification sent ({} delivered, {} failed)",
                    delivery.channel,
                    delivery.delivered,
                    delivery.failed
                );
                deliveries.push(delivery);
            }
            Err(e) => {
                tracing::error!("{} notification failed: {}", notifier.channel(), e);
                last_error = Some(e);
            }
        }
    }

    if deliveries.is_empty() {
        if let Some(e) = last_error {
            return Err(anyhow::Error::new(e).context("Every notification channel failed"));
        }
    }

    Ok(deliveries)
}

/// `run_once`, reporting a failure through the notifiers before returning it
pub async fn run_reporting(
    config: &Config,
    source: &dyn ListingSource,
    notifiers: &[Box<dyn Notifier>],
    dry_run: bool,
) -> anyhow::Result<RunReport> {
    match run_once(config, source, notifiers, dry_run).await {
        Ok(report) => Ok(report),
        Err(e) => {
            let error_msg = format!("Estate Sales Notifier Error: {e:#}");
            tracing::error!("{}", error_msg);

            if !dry_run {
                if let Err(report_err) = deliver(notifiers, &config.subject, &error_msg).await {
                    tracing::error!("Failed to report error: {report_err:#}");
                }
            }

            Err(e)
        }
    }
}

/// Longest accepted watch period, one week
pub const MAX_WATCH_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

/// Watch period for `minutes`, clamped to 1 minute ..= one week
pub fn watch_period(minutes: u64) -> Duration {
    let clamped = minutes.clamp(1, MAX_WATCH_INTERVAL_MINUTES);
    if clamped != minutes {
        tracing::warn!(
            "Watch interval of {} minutes is out of range, using {} minutes",
            minutes,
            clamped
        );
    }

    Duration::from_secs(clamped * 60)
}

/// Repeat `run_reporting` every `watch_interval_minutes` until `shutdown` resolves.
/// A failed run is logged and the loop keeps going.
pub async fn watch(
    config: &Config,
    source: &dyn ListingSource,
    notifiers: &[Box<dyn Notifier>],
    dry_run: bool,
    shutdown: impl Future<Output = ()>,
) {
    let period = watch_period(config.watch_interval_minutes);
    tracing::info!("Watching every {} minutes", period.as_secs() / 60);

    let mut interval = tokio::time::interval(period);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = run_reporting(config, source, notifiers, dry_run).await {
                    tracing::error!("Run failed: {e:#}");
                }
            }
        }
    }
}
