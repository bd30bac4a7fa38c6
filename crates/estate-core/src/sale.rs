use estate_types::{Listing, Sale};

use crate::distance::{is_within, parse_distance_label};
use crate::preprocess::{DefaultCleaner, TextCleaner};

pub fn prepare_sale(listing: Listing) -> Sale {
    let distance = parse_distance_label(&listing.raw_distance_text);

    Sale {
        title: DefaultCleaner.clean(&listing.title),
        address: DefaultCleaner.clean(&listing.address),
        url: listing.url,
        zip: listing.zip,
        distance: distance.miles,
        distance_label: distance.label,
        raw_date_text: listing.raw_date_text,
    }
}

/// Sales within `max_miles`, in page order
pub fn nearby(listings: Vec<Listing>, max_miles: f64) -> Vec<Sale> {
    listings
        .into_iter()
        .map(prepare_sale)
        .filter(|sale| is_within(sale.distance, max_miles))
        .collect()
}
