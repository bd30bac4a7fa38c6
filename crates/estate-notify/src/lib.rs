mod calendar;
mod email;
mod ics;
mod sms;
#[cfg(test)]
mod test_server;

pub use calendar::{CalendarEvent, GoogleCalendarNotifier};
pub use email::{EmailNotifier, compose_email};
pub use ics::IcsEvent;
pub use sms::TwilioSmsNotifier;

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use estate_config::Config;
use estate_types::Channel;
use reqwest::Url;

/// Events are scheduled a couple of minutes out so the popup fires right away
const EVENT_LEAD_MINUTES: i64 = 2;
const EVENT_LENGTH_MINUTES: i64 = 30;

/// Start and end of the reminder event created at `now`
pub fn event_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now + TimeDelta::minutes(EVENT_LEAD_MINUTES);
    (start, start + TimeDelta::minutes(EVENT_LENGTH_MINUTES))
}

/// Output sink for the formatted summary
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    fn channel(&self) -> Channel;

    /// Deliver to every recipient of the channel; fails only if none received it
    async fn notify(&self, subject: &str, message: &str) -> Result<Delivery, NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub channel: Channel,
    pub delivered: usize,
    pub failed: usize,
}

impl Delivery {
    /// Collapse per-recipient results; the last error is returned when nothing got through
    pub(crate) fn from_results(
        channel: Channel,
        results: Vec<Result<(), NotifyError>>,
    ) -> Result<Self, NotifyError> {
        let mut delivered = 0;
        let mut failures = Vec::new();

        for result in results {
            match result {
                Ok(()) => delivered += 1,
                Err(e) => failures.push(e),
            }
        }

        if delivered == 0 {
            if let Some(e) = failures.pop() {
                return Err(e);
            }
        }

        Ok(Self {
            channel,
            delivered,
            failed: failures.len(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Not configured: {0}")]
    NotConfigured(&'static str),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl NotifyError {
    /// Map a non-success HTTP status onto an error
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 | 403 => NotifyError::AuthenticationError,
            429 => NotifyError::RateLimitExceeded,
            _ => NotifyError::ApiError(format!("HTTP {status}: {}", body.trim())),
        }
    }
}

/// `base` with `segments` appended, each percent-encoded as a single path segment
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url, NotifyError> {
    let mut url = Url::parse(base).map_err(|e| NotifyError::InvalidUrl(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|_| NotifyError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, NotifyError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Notifiers for every configured channel in `config.channels`.
///
/// Channels missing credentials or recipients are skipped with a warning.
pub fn build_notifiers(config: &Config, timeout: Duration) -> Vec<Box<dyn Notifier>> {
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();

    for channel in &config.channels {
        let built: Result<Box<dyn Notifier>, NotifyError> = match channel {
            Channel::Calendar => GoogleCalendarNotifier::new(&config.calendar, timeout)
                .map(|n| Box::new(n) as Box<dyn Notifier>),
            Channel::Sms => {
                TwilioSmsNotifier::new(&config.sms, timeout).map(|n| Box::new(n) as Box<dyn Notifier>)
            }
            Channel::Email => {
                EmailNotifier::new(&config.email).map(|n| Box::new(n) as Box<dyn Notifier>)
            }
        };

        match built {
            Ok(notifier) => notifiers.push(notifier),
            Err(e) => tracing::warn!("Skipping {} channel: {}", channel, e),
        }
    }

    notifiers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_starts_two_minutes_out() {
        let now = DateTime::parse_from_rfc3339("2025-11-07T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let (start, end) = event_window(now);

        assert_eq!(start.to_rfc3339(), "2025-11-07T12:02:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-11-07T12:32:00+00:00");
    }

    #[test]
    fn partial_delivery_is_success() {
        let delivery = Delivery::from_results(
            Channel::Calendar,
            vec![Ok(()), Err(NotifyError::AuthenticationError), Ok(())],
        )
        .unwrap();

        assert_eq!(delivery.delivered, 2);
        assert_eq!(delivery.failed, 1);
    }

    #[test]
    fn total_failure_returns_last_error() {
        let result = Delivery::from_results(
            Channel::Sms,
            vec![
                Err(NotifyError::AuthenticationError),
                Err(NotifyError::RateLimitExceeded),
            ],
        );

        assert!(matches!(result, Err(NotifyError::RateLimitExceeded)));
    }

    #[test]
    fn status_codes_map_to_errors() {
        use reqwest::StatusCode;

        assert!(matches!(
            NotifyError::from_status(StatusCode::UNAUTHORIZED, ""),
            NotifyError::AuthenticationError
        ));
        assert!(matches!(
            NotifyError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            NotifyError::RateLimitExceeded
        ));
        assert_eq!(
            NotifyError::from_status(StatusCode::BAD_REQUEST, " bad body\n").to_string(),
            "API error: HTTP 400 Bad Request: bad body"
        );
    }

    #[test]
    fn endpoint_encodes_each_segment() {
        let url = endpoint(
            "https://www.googleapis.com/calendar/v3/",
            &["calendars", "team#sales@group.calendar.google.com", "events"],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/team%23sales@group.calendar.google.com/events"
        );

        let url = endpoint("https://api.twilio.com/2010-04-01", &["Accounts", "AC1", "Messages.json"]).unwrap();
        assert_eq!(url.as_str(), "https://api.twilio.com/2010-04-01/Accounts/AC1/Messages.json");
    }

    #[test]
    fn endpoint_rejects_garbage() {
        assert!(matches!(
            endpoint("not a url", &["x"]),
            Err(NotifyError::InvalidUrl(_))
        ));
    }

    #[test]
    fn unconfigured_channels_are_skipped() {
        let mut config = Config::from_lookup(|_| None);
        config.channels = vec![Channel::Calendar, Channel::Sms, Channel::Email];
        config.email.from = "alerts@example.com".to_string();
        config.email.recipients = vec!["me@example.com".to_string()];

        let notifiers = build_notifiers(&config, Duration::from_secs(5));

        let channels: Vec<Channel> = notifiers.iter().map(|n| n.channel()).collect();
        assert_eq!(channels, vec![Channel::Email]);
    }
}
