pub mod app_config;
pub mod caption;
pub mod condition;
pub mod config;
pub mod estimate;
pub mod history;
pub mod listing;
pub mod showcase;

use thiserror::Error;

pub use app_config::{AppConfig, AzureVisionConfig, ClientConfig, EbayCredentials, Environment};
pub use caption::{
    format_caption, lower_bound_from_caption, parse_caption, CaptionParts, ERROR_CAPTION,
    PENDING_CAPTION,
};
pub use condition::Condition;
pub use config::{load_app_config, load_app_config_from_env, load_client_config};
pub use estimate::{
    estimate_prices, lower_bound_from_text, minimum_total, minimum_total_of, PriceEstimate,
    NO_PRICES_FOUND,
};
pub use history::{EntryId, EntryStatus, History, HistoryEntry, HistoryError, LookupOutcome};
pub use listing::{first_thumbnail, listing_prices, Listing, ListingPrice};
pub use showcase::{FeaturedItem, Showcase};

/// Caption used when an image could not be identified.
pub const UNKNOWN_ITEM: &str = "unknown item";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown condition: {0}")]
    UnknownCondition(String),
}
