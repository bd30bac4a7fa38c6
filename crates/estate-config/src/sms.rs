use serde::{Deserialize, Serialize};

use crate::lookup::{self, Lookup};

/// Twilio messaging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sending number in E.164 form
    pub from: String,
    pub recipients: Vec<String>,
    pub api_url: String,
}

impl SmsConfig {
    pub fn new(lookup: Lookup) -> Self {
        Self {
            account_sid: lookup::string_or(lookup, "TWILIO_ACCOUNT_SID", ""),
            auth_token: lookup::string_or(lookup, "TWILIO_AUTH_TOKEN", ""),
            from: lookup::string_or(lookup, "TWILIO_FROM", ""),
            recipients: lookup::list(lookup, "SMS_RECIPIENTS"),
            api_url: lookup::string_or(lookup, "SMS_API_URL", "https://api.twilio.com/2010-04-01"),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.account_sid.is_empty()
            && !self.auth_token.is_empty()
            && !self.from.is_empty()
            && !self.recipients.is_empty()
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self::new(&|_: &str| None)
    }
}
