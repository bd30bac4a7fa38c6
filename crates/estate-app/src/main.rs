use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use estate_config::Config;
use estate_notify::build_notifiers;
use estate_scrape::EstateSalesClient;
use tokio::signal;

mod cli;
mod logging;
mod pipeline;

#[cfg(test)]
mod tests {
    mod pipeline_tests;
}

use self::cli::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // .env may carry RUST_LOG, so load it before logging starts
    dotenvy::dotenv().ok();
    logging::init(args.log_json);

    if let Some(text) = &args.normalize {
        println!("{}", estate_core::normalize(text));
        return;
    }

    if let Err(e) = run(args).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let timeout = Duration::from_secs(config.timeout_seconds);

    let source = EstateSalesClient::new(&config.scrape, timeout)
        .context("Failed to build HTTP client")?;
    let notifiers = if args.dry_run {
        Vec::new()
    } else {
        build_notifiers(&config, timeout)
    };

    if args.watch {
        // Shutdown future (Ctrl+C)
        let shutdown = async {
            signal::ctrl_c().await.expect("failed to listen for ctrl+c");
        };

        pipeline::watch(&config, &source, &notifiers, args.dry_run, shutdown).await;
        return Ok(());
    }

    let report = pipeline::run_reporting(&config, &source, &notifiers, args.dry_run).await?;
    tracing::info!(
        "Done: {} sales, {} channels notified",
        report.sales,
        report.deliveries.len()
    );

    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::from_env(),
    };

    if !args.channels.is_empty() {
        config.channels = args.channels.clone();
    }
    if let Some(minutes) = args.interval_minutes {
        config.watch_interval_minutes = minutes;
    }

    Ok(config)
}
