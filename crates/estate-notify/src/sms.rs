use std::time::Duration;

use async_trait::async_trait;
use estate_config::sms::SmsConfig;
use estate_types::Channel;

use crate::{Delivery, Notifier, NotifyError, endpoint, http_client};

/// Twilio rejects bodies above this many characters
const MAX_BODY_CHARS: usize = 1600;

/// Cut to the provider limit on a char boundary, marking the cut with an ellipsis
pub(crate) fn fit_body(message: &str) -> String {
    if message.chars().count() <= MAX_BODY_CHARS {
        return message.to_string();
    }

    let mut body: String = message.chars().take(MAX_BODY_CHARS - 1).collect();
    body.push('…');
    body
}

/// Form fields of a Twilio message
pub(crate) fn form<'a>(to: &'a str, from: &'a str, body: &'a str) -> [(&'static str, &'a str); 3] {
    [("To", to), ("From", from), ("Body", body)]
}

#[derive(Clone)]
pub struct TwilioSmsNotifier {
    client: reqwest::Client,
    api_url: String,
    account_sid: String,
    auth_token: String,
    from: String,
    recipients: Vec<String>,
}

impl TwilioSmsNotifier {
    pub fn new(config: &SmsConfig, timeout: Duration) -> Result<Self, NotifyError> {
        if !config.is_configured() {
            return Err(NotifyError::NotConfigured(
                "set TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN, TWILIO_FROM and SMS_RECIPIENTS",
            ));
        }

        Ok(Self {
            client: http_client(timeout)?,
            api_url: config.api_url.clone(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from: config.from.clone(),
            recipients: config.recipients.clone(),
        })
    }

    /// Twilio Messages resource call for one recipient
    fn request(&self, to: &str, body: &str) -> Result<reqwest::Request, NotifyError> {
        let url = endpoint(&self.api_url, &["Accounts", self.account_sid.as_str(), "Messages.json"])?;

        Ok(self
            .client
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form(to, &self.from, body))
            .build()?)
    }

    async fn send(&self, to: &str, body: &str) -> Result<(), NotifyError> {
        let request = self.request(to, body)?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::from_status(status, &body));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TwilioSmsNotifier {
    fn channel(&self) -> Channel {
        Channel::Sms
    }

    async fn notify(&self, _subject: &str, message: &str) -> Result<Delivery, NotifyError> {
        let body = fit_body(message);

        let mut results = Vec::with_capacity(self.recipients.len());
        for to in &self.recipients {
            let result = self.send(to, &body).await;
            match &result {
                Ok(()) => tracing::info!("SMS sent to {}", to),
                Err(e) => tracing::error!("Failed to send SMS to {}: {}", to, e),
            }
            results.push(result);
        }

        Delivery::from_results(Channel::Sms, results)
    }
}
