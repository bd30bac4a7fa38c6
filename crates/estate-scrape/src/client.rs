use std::time::Duration;

use async_trait::async_trait;
use estate_config::scrape::ScrapeConfig;
use estate_types::Listing;

use crate::{ListingSource, ScrapeError, parse_listings};

#[derive(Clone)]
pub struct EstateSalesClient {
    client: reqwest::Client,
    page_url: String,
    site_origin: String,
}

impl EstateSalesClient {
    pub fn new(config: &ScrapeConfig, timeout: Duration) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            page_url: config.base_url.clone(),
            site_origin: config.site_origin.clone(),
        })
    }
}

#[async_trait]
impl ListingSource for EstateSalesClient {
    async fn fetch(&self) -> Result<Vec<Listing>, ScrapeError> {
        tracing::debug!("GET {}", self.page_url);

        let response = self.client.get(&self.page_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Http {
                status: status.as_u16(),
                url: self.page_url.clone(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("Received {} bytes", body.len());

        parse_listings(&body, &self.site_origin)
    }

    fn page_url(&self) -> &str {
        &self.page_url
    }
}
