use serde::{Deserialize, Serialize};

/// Asking price of a listing, as the marketplace reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPrice {
    /// Decimal amount as a string, e.g. `"12.99"`. Not guaranteed numeric.
    pub value: String,
    /// ISO 4217 currency code (e.g., `"USD"`).
    pub currency: String,
}

/// One marketplace search result, normalized from the provider's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub title: String,
    pub price: Option<ListingPrice>,
    pub condition: Option<String>,
    #[serde(default)]
    pub buying_options: Vec<String>,
    pub item_web_url: Option<String>,
    /// Thumbnail image URL.
    pub image: Option<String>,
}

impl Listing {
    /// Numeric asking price, or `None` when absent or not a number.
    #[must_use]
    pub fn price_value(&self) -> Option<f64> {
        self.price
            .as_ref()
            .and_then(|p| p.value.trim().parse::<f64>().ok())
    }
}

/// Asking prices of every listing that carries a numeric price.
///
/// Non-positive values are passed through; [`crate::estimate_prices`] drops them.
pub fn listing_prices(listings: &[Listing]) -> impl Iterator<Item = f64> + '_ {
    listings.iter().filter_map(Listing::price_value)
}

/// Thumbnail of the first listing, used as the history entry's image.
#[must_use]
pub fn first_thumbnail(listings: &[Listing]) -> Option<&str> {
    listings
        .first()
        .and_then(|l| l.image.as_deref())
        .filter(|s| !s.is_empty())
}
