pub mod date_range;
pub mod distance;
pub mod message;
pub mod preprocess;
pub mod sale;

pub use date_range::normalize;
pub use message::format_message;
pub use sale::{nearby, prepare_sale};
