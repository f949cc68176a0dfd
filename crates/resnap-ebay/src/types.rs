//! eBay Browse API response types.
//!
//! Only the fields the lookup service forwards are modelled. Every field on
//! an item summary is optional in practice: auction-only and some
//! multi-variation listings omit `price`, and not every listing has a
//! primary image.

use serde::Deserialize;

/// `POST /identity/v1/oauth2/token` response for the client-credentials grant.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// `GET /buy/browse/v1/item_summary/search` response.
///
/// `itemSummaries` is omitted entirely when nothing matches.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub item_summaries: Vec<ItemSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<Amount>,
    /// Human-readable condition, e.g. `"Pre-owned"`.
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default)]
    pub buying_options: Vec<String>,
    #[serde(default)]
    pub item_web_url: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
}

/// Monetary amount; `value` is a decimal string such as `"24.99"`.
#[derive(Debug, Deserialize)]
pub struct Amount {
    pub value: String,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub image_url: String,
}
