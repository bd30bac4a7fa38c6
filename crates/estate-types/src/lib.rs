mod types;

pub use types::{Channel, Listing, Sale};
