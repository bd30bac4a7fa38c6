use serde::{Deserialize, Serialize};

use crate::lookup::{self, Lookup};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Calendars an event is inserted into (usually gmail addresses)
    pub calendar_ids: Vec<String>,
    /// OAuth bearer token with the calendar scope, minted outside this program
    pub access_token: String,
    pub api_url: String,
}

impl CalendarConfig {
    pub fn new(lookup: Lookup) -> Self {
        Self {
            calendar_ids: lookup::list(lookup, "CALENDAR_IDS"),
            access_token: lookup::string_or(lookup, "GOOGLE_ACCESS_TOKEN", ""),
            api_url: lookup::string_or(
                lookup,
                "CALENDAR_API_URL",
                "https://www.googleapis.com/calendar/v3",
            ),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.access_token.is_empty() && !self.calendar_ids.is_empty()
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self::new(&|_: &str| None)
    }
}
