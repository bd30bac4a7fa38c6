use estate_types::Listing;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::ScrapeError;

static ZIP_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/([0-9]{5})/").unwrap());

const DEFAULT_TITLE: &str = "Estate Sale";

struct CardSelectors {
    card: Selector,
    title: Selector,
    address: Selector,
    date: Selector,
    distance: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            card: selector("a.sale-row")?,
            title: selector("h3")?,
            address: selector(r#"[class*="sale-row__address"]"#)?,
            date: selector(r#"[class*="sale-row__date"]"#)?,
            distance: selector(r#"[class*="sale-row__distance"]"#)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e:?}")))
}

/// Text nodes trimmed and joined with no separator.
///
/// The site's date text is built from several nodes; joining them bare is what
/// yields strings like "Sat, Nov 8Nearby9am to 1pm" that the date normalizer expects.
fn stripped_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}

fn first_text(card: ElementRef, selector: &Selector) -> Option<String> {
    card.select(selector).next().map(stripped_text)
}

/// First five-digit path segment of a sale link ("/TX/Austin/78759/12345" -> "78759")
pub fn extract_zip(href: &str) -> String {
    ZIP_SEGMENT
        .captures(href)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

fn absolute_url(href: &str, origin: &str) -> Option<String> {
    if href.starts_with('/') {
        Some(format!("{}{}", origin.trim_end_matches('/'), href))
    } else if href.is_empty() {
        None
    } else {
        Some(href.to_string())
    }
}

/// Parse every `a.sale-row` card of a listing page. Cards without a link are skipped.
pub fn parse_listings(html: &str, origin: &str) -> Result<Vec<Listing>, ScrapeError> {
    let selectors = CardSelectors::new()?;
    let document = Html::parse_document(html);

    let mut listings = Vec::new();
    for card in document.select(&selectors.card) {
        let href = card.value().attr("href").unwrap_or("").trim();
        let Some(url) = absolute_url(href, origin) else {
            tracing::warn!("Skipping sale card without a link");
            continue;
        };

        let listing = Listing {
            title: first_text(card, &selectors.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            address: first_text(card, &selectors.address).unwrap_or_default(),
            zip: extract_zip(href),
            url,
            raw_distance_text: first_text(card, &selectors.distance).unwrap_or_default(),
            raw_date_text: first_text(card, &selectors.date).unwrap_or_default(),
        };

        tracing::debug!(
            "Parsed card: title='{}' dates='{}' distance='{}'",
            listing.title,
            listing.raw_date_text,
            listing.raw_distance_text
        );
        listings.push(listing);
    }

    Ok(listings)
}
