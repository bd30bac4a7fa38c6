use std::path::PathBuf;

use async_trait::async_trait;
use estate_config::email::EmailConfig;
use estate_types::Channel;

use crate::{Delivery, IcsEvent, Notifier, NotifyError};

/// Writes each summary as a ready-to-send `.eml` with a calendar invite attached
#[derive(Clone)]
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    pub fn new(config: &EmailConfig) -> Result<Self, NotifyError> {
        if !config.is_configured() {
            return Err(NotifyError::NotConfigured("set EMAIL_FROM and EMAIL_RECIPIENTS"));
        }

        Ok(Self {
            config: config.clone(),
        })
    }

    async fn write(&self, subject: &str, message: &str) -> Result<PathBuf, NotifyError> {
        let invite = IcsEvent::new(subject, message, &self.config.event_location);
        let email = compose_email(&self.config, subject, message, &invite);

        let dir = PathBuf::from(&self.config.outbox_dir);
        tokio::fs::create_dir_all(&dir).await?;

        let short_id: String = invite.uid.chars().take(8).collect();
        let path = dir.join(format!(
            "estate-sales-{}-{}.eml",
            invite.now.format("%Y%m%dT%H%M%SZ"),
            short_id
        ));
        tokio::fs::write(&path, email).await?;

        Ok(path)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn notify(&self, subject: &str, message: &str) -> Result<Delivery, NotifyError> {
        let result = match self.write(subject, message).await {
            Ok(path) => {
                tracing::info!(
                    "Email for {} written to {}",
                    self.config.recipients.join(", "),
                    path.display()
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to write email: {}", e);
                Err(e)
            }
        };

        Delivery::from_results(Channel::Email, vec![result])
    }
}

/// Headers can't carry line breaks
fn header_value(value: &str) -> String {
    value.split(['\r', '\n']).filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ")
}

fn crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// MIME message: plain text and html alternatives plus the invite as `invite.ics`
pub fn compose_email(config: &EmailConfig, subject: &str, message: &str, invite: &IcsEvent) -> String {
    let mixed = format!("mixed-{}", invite.uid);
    let alternative = format!("alt-{}", invite.uid);
    let text = crlf(message);
    let html = crlf(&escape_html(message));

    let lines = [
        format!("From: {}", header_value(&config.from)),
        format!("To: {}", header_value(&config.recipients.join(", "))),
        format!("Subject: {}", header_value(subject)),
        format!("Date: {}", invite.now.to_rfc2822()),
        format!("Message-ID: <{}@estate-sales-notifier>", invite.uid),
        "MIME-Version: 1.0".to_string(),
        format!("Content-Type: multipart/mixed; boundary=\"{mixed}\""),
        String::new(),
        format!("--{mixed}"),
        format!("Content-Type: multipart/alternative; boundary=\"{alternative}\""),
        String::new(),
        format!("--{alternative}"),
        "Content-Type: text/plain; charset=\"utf-8\"".to_string(),
        "Content-Transfer-Encoding: 8bit".to_string(),
        String::new(),
        text,
        format!("--{alternative}"),
        "Content-Type: text/html; charset=\"utf-8\"".to_string(),
        "Content-Transfer-Encoding: 8bit".to_string(),
        String::new(),
        format!("<html><body><pre>{html}</pre></body></html>"),
        format!("--{alternative}--"),
        String::new(),
        format!("--{mixed}"),
        "Content-Type: text/calendar; charset=\"utf-8\"; method=PUBLISH".to_string(),
        "Content-Transfer-Encoding: 8bit".to_string(),
        "Content-Disposition: attachment; filename=\"invite.ics\"".to_string(),
        String::new(),
        invite.render(),
        format!("--{mixed}--"),
        String::new(),
    ];

    lines.join("\r\n")
}
