use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use estate_config::calendar::CalendarConfig;
use estate_types::Channel;
use serde::Serialize;

use crate::{Delivery, Notifier, NotifyError, endpoint, event_window, http_client};

const POPUP_MINUTES: u32 = 1;

/// Google Calendar event resource, only the fields we set
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
    pub reminders: Reminders,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: u32,
}

impl CalendarEvent {
    /// Short event starting just after `now` with a single popup reminder
    pub fn popup(summary: &str, description: &str, now: DateTime<Utc>) -> Self {
        let (start, end) = event_window(now);
        let utc = |t: DateTime<Utc>| EventTime {
            date_time: t.format("%Y-%m-%dT%H:%M:%S").to_string(),
            time_zone: "UTC".to_string(),
        };

        Self {
            summary: summary.to_string(),
            description: description.to_string(),
            start: utc(start),
            end: utc(end),
            reminders: Reminders {
                use_default: false,
                overrides: vec![ReminderOverride {
                    method: "popup".to_string(),
                    minutes: POPUP_MINUTES,
                }],
            },
        }
    }
}

#[derive(Clone)]
pub struct GoogleCalendarNotifier {
    client: reqwest::Client,
    api_url: String,
    access_token: String,
    calendar_ids: Vec<String>,
}

impl GoogleCalendarNotifier {
    pub fn new(config: &CalendarConfig, timeout: Duration) -> Result<Self, NotifyError> {
        if !config.is_configured() {
            return Err(NotifyError::NotConfigured(
                "set GOOGLE_ACCESS_TOKEN and CALENDAR_IDS",
            ));
        }

        Ok(Self {
            client: http_client(timeout)?,
            api_url: config.api_url.clone(),
            access_token: config.access_token.clone(),
            calendar_ids: config.calendar_ids.clone(),
        })
    }

    /// Insert the event into one calendar, returning its html link
    async fn insert(&self, calendar_id: &str, event: &CalendarEvent) -> Result<String, NotifyError> {
        let url = endpoint(&self.api_url, &["calendars", calendar_id, "events"])?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(event)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::from_status(status, &body));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| NotifyError::ApiError(format!("Failed to parse response: {}", e)))?;

        Ok(json["htmlLink"].as_str().unwrap_or_default().to_string())
    }
}

#[async_trait]
impl Notifier for GoogleCalendarNotifier {
    fn channel(&self) -> Channel {
        Channel::Calendar
    }

    async fn notify(&self, subject: &str, message: &str) -> Result<Delivery, NotifyError> {
        let event = CalendarEvent::popup(subject, message, Utc::now());

        let mut results = Vec::with_capacity(self.calendar_ids.len());
        for calendar_id in &self.calendar_ids {
            let result = match self.insert(calendar_id, &event).await {
                Ok(link) => {
                    tracing::info!("Calendar event created for {}: {}", calendar_id, link);
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("Failed to create event for {}: {}", calendar_id, e);
                    Err(e)
                }
            };
            results.push(result);
        }

        Delivery::from_results(Channel::Calendar, results)
    }
}
