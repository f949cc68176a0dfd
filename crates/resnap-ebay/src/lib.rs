pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::EbayClient;
pub use error::EbayError;
pub use normalize::normalize_item;
pub use types::{ItemSummary, SearchResponse, TokenResponse};
