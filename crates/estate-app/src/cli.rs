use std::path::PathBuf;

use clap::Parser;
use estate_types::Channel;

/// Scrape nearby estate sales and send a summary
#[derive(Debug, Parser)]
#[command(name = "estate-sales-notifier", version, about)]
pub struct Args {
    /// JSON config file; replaces the environment-based config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Delivery channel (calendar, sms, email); repeat for several
    #[arg(long = "channel", value_name = "CHANNEL")]
    pub channels: Vec<Channel>,

    /// Print the summary without sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Keep running, scraping every interval
    #[arg(long)]
    pub watch: bool,

    /// Minutes between runs in watch mode
    #[arg(long, value_name = "N")]
    pub interval_minutes: Option<u64>,

    /// Emit JSON log lines even on a terminal
    #[arg(long)]
    pub log_json: bool,

    /// Print the normalized form of a captured date text and exit
    #[arg(long, value_name = "TEXT")]
    pub normalize: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_channels() {
        let args = Args::try_parse_from([
            "estate-sales-notifier",
            "--channel",
            "sms",
            "--channel",
            "Email",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.channels, vec![Channel::Sms, Channel::Email]);
        assert!(args.dry_run);
        assert!(!args.watch);
    }

    #[test]
    fn rejects_unknown_channel() {
        assert!(Args::try_parse_from(["estate-sales-notifier", "--channel", "fax"]).is_err());
    }
}
