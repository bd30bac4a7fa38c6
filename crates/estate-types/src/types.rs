use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One sale card as scraped from the listing page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub title: String,
    pub address: String,
    /// Absolute link to the sale page
    pub url: String,
    /// Five-digit zip taken from the link path, empty when absent
    pub zip: String,
    pub raw_distance_text: String,
    pub raw_date_text: String,
}

/// A listing after distance parsing and text cleanup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sale {
    pub title: String,
    pub address: String,
    pub url: String,
    pub zip: String,
    /// Miles from the search location, `None` when the page gave nothing usable
    pub distance: Option<f64>,
    /// Display form of the distance ("Nearby", "5.2 mi"), may be empty
    pub distance_label: String,
    pub raw_date_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Calendar,
    Sms,
    Email,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Calendar => "calendar",
            Channel::Sms => "sms",
            Channel::Email => "email",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calendar" => Ok(Channel::Calendar),
            "sms" => Ok(Channel::Sms),
            "email" => Ok(Channel::Email),
            other => Err(format!("unknown channel: {other}")),
        }
    }
}
