use serde::{Deserialize, Serialize};

use crate::lookup::{self, Lookup};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub from: String,
    pub recipients: Vec<String>,
    /// Directory composed `.eml` files are written to
    pub outbox_dir: String,
    /// LOCATION of the attached calendar invite
    pub event_location: String,
}

impl EmailConfig {
    pub fn new(lookup: Lookup) -> Self {
        Self {
            from: lookup::string_or(lookup, "EMAIL_FROM", ""),
            recipients: lookup::list(lookup, "EMAIL_RECIPIENTS"),
            outbox_dir: lookup::string_or(lookup, "EMAIL_OUTBOX_DIR", "outbox"),
            event_location: lookup::string_or(lookup, "EVENT_LOCATION", "Austin, TX 78759"),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.from.is_empty() && !self.recipients.is_empty()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self::new(&|_: &str| None)
    }
}
