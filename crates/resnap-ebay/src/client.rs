//! HTTP client for the eBay Browse API.
//!
//! Every search obtains a fresh application token through the OAuth
//! client-credentials grant, then queries `item_summary/search` restricted
//! to fixed-price listings in the requested condition codes.

use std::time::Duration;

use reqwest::{Client, Url};
use resnap_core::{Condition, Listing};
use serde::de::DeserializeOwned;

use crate::error::EbayError;
use crate::normalize::normalize_item;
use crate::types::{SearchResponse, TokenResponse};

const TOKEN_PATH: &str = "identity/v1/oauth2/token";
const SEARCH_PATH: &str = "buy/browse/v1/item_summary/search";
const OAUTH_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";
const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Client for the eBay Browse API.
///
/// Base URLs come from configuration (`EBAY_API_BASE_URL`,
/// `EBAY_IDENTITY_BASE_URL`), which is also how tests point it at a mock.
pub struct EbayClient {
    client: Client,
    client_id: String,
    client_secret: String,
    api_base: Url,
    identity_base: Url,
    search_limit: u32,
}

impl EbayClient {
    /// Creates a new client with custom API and identity base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`EbayError::InvalidBaseUrl`] if either
    /// base URL does not parse.
    pub fn with_base_urls(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
        api_base: &str,
        identity_base: &str,
    ) -> Result<Self, EbayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("resnap/0.1 (price-lookup)")
            .build()?;

        Ok(Self {
            client,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            api_base: normalize_base(api_base)?,
            identity_base: normalize_base(identity_base)?,
            search_limit: DEFAULT_SEARCH_LIMIT,
        })
    }

    /// Overrides the number of listings requested per search.
    #[must_use]
    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    /// Requests an application access token.
    ///
    /// # Errors
    ///
    /// - [`EbayError::Auth`] if eBay rejects the credentials.
    /// - [`EbayError::Http`] on network failure.
    /// - [`EbayError::Deserialize`] if the token payload is malformed.
    pub async fn access_token(&self) -> Result<String, EbayError> {
        let url = self.token_url();
        let response = self
            .client
            .post(url.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", OAUTH_SCOPE)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EbayError::Auth {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = decode(response, "oauth2/token").await?;
        tracing::debug!(expires_in = ?token.expires_in, "obtained eBay application token");
        Ok(token.access_token)
    }

    /// Searches fixed-price listings matching `term` in the given condition.
    ///
    /// # Errors
    ///
    /// - [`EbayError::Auth`] if the token request is rejected.
    /// - [`EbayError::UnexpectedStatus`] on a non-2xx search response.
    /// - [`EbayError::Http`] on network failure.
    /// - [`EbayError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search(&self, term: &str, condition: Condition) -> Result<Vec<Listing>, EbayError> {
        let token = self.access_token().await?;
        let url = self.search_url(term, condition);

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EbayError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body: SearchResponse = decode(response, &format!("search(q={term})")).await?;
        tracing::debug!(
            term,
            condition = %condition,
            total = ?body.total,
            returned = body.item_summaries.len(),
            "eBay search complete"
        );

        Ok(body.item_summaries.into_iter().map(normalize_item).collect())
    }

    fn token_url(&self) -> Url {
        let mut url = self.identity_base.clone();
        url.set_path(&format!("{}{TOKEN_PATH}", self.identity_base.path()));
        url
    }

    /// Builds the search URL with percent-encoded query parameters.
    fn search_url(&self, term: &str, condition: Condition) -> Url {
        let mut url = self.api_base.clone();
        url.set_path(&format!("{}{SEARCH_PATH}", self.api_base.path()));
        url.query_pairs_mut()
            .append_pair("q", term)
            .append_pair("limit", &self.search_limit.to_string())
            .append_pair("filter", &condition_filter(condition));
        url
    }
}

/// Browse API filter for fixed-price listings in `condition`'s codes,
/// e.g. `buyingOptions:{FIXED_PRICE},conditionIds:{3000|3010}`.
#[must_use]
pub fn condition_filter(condition: Condition) -> String {
    let ids = condition
        .ebay_condition_ids()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|");
    format!("buyingOptions:{{FIXED_PRICE}},conditionIds:{{{ids}}}")
}

/// Ensures the base URL ends with exactly one slash so paths append rather
/// than replace the last segment.
fn normalize_base(base_url: &str) -> Result<Url, EbayError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| EbayError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, EbayError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| EbayError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
