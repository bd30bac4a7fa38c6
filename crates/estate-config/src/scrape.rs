use serde::{Deserialize, Serialize};

use crate::lookup::{self, Lookup};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Listing page searched around the target location
    pub base_url: String,
    /// Prefix for site-relative sale links
    pub site_origin: String,
    pub max_distance_miles: f64,
    /// Number of sales written into the summary
    pub max_listings: usize,
    /// Shown in the summary header ("Near ...")
    pub area_label: String,
    pub user_agent: String,
}

impl ScrapeConfig {
    pub fn new(lookup: Lookup) -> Self {
        Self {
            base_url: lookup::string_or(
                lookup,
                "ESTATE_SALES_URL",
                "https://www.estatesales.net/TX/Austin/78759",
            ),
            site_origin: lookup::string_or(lookup, "SITE_ORIGIN", "https://www.estatesales.net"),
            max_distance_miles: lookup::parse_or(lookup, "MAX_DISTANCE_MILES", 15.0),
            max_listings: lookup::parse_or(lookup, "MAX_LISTINGS", 10),
            area_label: lookup::string_or(lookup, "AREA_LABEL", "Austin 78759"),
            user_agent: lookup::string_or(lookup, "USER_AGENT", DEFAULT_USER_AGENT),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::new(&|_: &str| None)
    }
}
