use std::env;
use std::path::Path;

use estate_types::Channel;
use serde::{Deserialize, Serialize};

use self::calendar::CalendarConfig;
use self::email::EmailConfig;
pub use self::lookup::Lookup;
use self::scrape::ScrapeConfig;
use self::sms::SmsConfig;

pub mod calendar;
pub mod email;
mod lookup;
pub mod scrape;
pub mod sms;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub calendar: CalendarConfig,
    pub sms: SmsConfig,
    pub email: EmailConfig,

    /// Channels the summary is delivered through
    pub channels: Vec<Channel>,
    /// Event summary / email subject for every channel
    pub subject: String,
    /// Timeout applied to every outbound HTTP request
    pub timeout_seconds: u64,
    /// Period of the `--watch` loop
    pub watch_interval_minutes: u64,
}

impl Config {
    /// Build from process environment (call `dotenvy::dotenv()` first to pick up `.env`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup: Lookup = &lookup;

        let channels = lookup::list(lookup, "NOTIFY_CHANNELS")
            .iter()
            .filter_map(|c| c.parse().ok())
            .collect::<Vec<Channel>>();

        Config {
            scrape: ScrapeConfig::new(lookup),
            calendar: CalendarConfig::new(lookup),
            sms: SmsConfig::new(lookup),
            email: EmailConfig::new(lookup),

            channels: if channels.is_empty() {
                vec![Channel::Calendar]
            } else {
                channels
            },
            subject: lookup::string_or(lookup, "NOTIFY_SUBJECT", "Estate Sales This Weekend"),
            timeout_seconds: lookup::parse_or(lookup, "TIMEOUT_SECONDS", 30), // 30 seconds default
            watch_interval_minutes: lookup::parse_or(lookup, "WATCH_INTERVAL_MINUTES", 60),
        }
    }

    /// Load a JSON config file; fields missing from the file take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_original_search() {
        let config = Config::default();

        assert_eq!(config.scrape.base_url, "https://www.estatesales.net/TX/Austin/78759");
        assert_eq!(config.scrape.max_distance_miles, 15.0);
        assert_eq!(config.scrape.max_listings, 10);
        assert_eq!(config.channels, vec![Channel::Calendar]);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.subject, "Estate Sales This Weekend");
        assert!(config.calendar.calendar_ids.is_empty());
    }

    #[test]
    fn env_values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("MAX_DISTANCE_MILES", "7.5"),
            ("NOTIFY_CHANNELS", "sms, Email"),
            ("CALENDAR_IDS", "a@example.com,,b@example.com "),
            ("TIMEOUT_SECONDS", "5"),
        ]));

        assert_eq!(config.scrape.max_distance_miles, 7.5);
        assert_eq!(config.channels, vec![Channel::Sms, Channel::Email]);
        assert_eq!(config.calendar.calendar_ids, vec!["a@example.com", "b@example.com"]);
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("MAX_LISTINGS", "ten"),
            ("WATCH_INTERVAL_MINUTES", ""),
        ]));

        assert_eq!(config.scrape.max_listings, 10);
        assert_eq!(config.watch_interval_minutes, 60);
    }

    #[test]
    fn unknown_channels_are_dropped() {
        let config = Config::from_lookup(lookup_from(&[("NOTIFY_CHANNELS", "pager,sms")]));
        assert_eq!(config.channels, vec![Channel::Sms]);

        let config = Config::from_lookup(lookup_from(&[("NOTIFY_CHANNELS", "pager")]));
        assert_eq!(config.channels, vec![Channel::Calendar]);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "scrape": { "max_distance_miles": 3 },
            "channels": ["email"],
            "email": { "recipients": ["someone@example.com"] }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.scrape.max_distance_miles, 3.0);
        assert_eq!(config.scrape.max_listings, 10);
        assert_eq!(config.channels, vec![Channel::Email]);
        assert_eq!(config.email.recipients, vec!["someone@example.com"]);
        assert_eq!(config.email.outbox_dir, "outbox");
        assert_eq!(config.sms.api_url, "https://api.twilio.com/2010-04-01");
    }
}
