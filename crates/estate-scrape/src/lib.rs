mod client;
mod parse;

pub use client::EstateSalesClient;
pub use parse::{extract_zip, parse_listings};

use estate_types::Listing;

/// Where listings come from
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch every sale card currently on the page
    async fn fetch(&self) -> Result<Vec<Listing>, ScrapeError>;

    /// Page the listings are read from, for log lines and the summary
    fn page_url(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Invalid selector: {0}")]
    Selector(String),
}
