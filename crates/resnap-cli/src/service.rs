//! HTTP client for the ReSnap lookup service (`resnap-server`).

use std::time::Duration;

use anyhow::Context;
use reqwest::{multipart, Client, Url};
use resnap_core::{Condition, Listing, PriceEstimate};
use serde::{Deserialize, Serialize};

/// Label used when the service cannot caption a photo at all.
pub(crate) const CLIENT_UNKNOWN_ITEM: &str = "Unknown item";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    search_term: &'a str,
    condition: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LookupResponse {
    #[serde(default)]
    pub items: Vec<Listing>,
    pub estimate: PriceEstimate,
}

#[derive(Debug, Deserialize)]
struct CaptionResponse {
    caption: String,
}

/// A photo ready to upload.
#[derive(Debug, Clone)]
pub(crate) struct Photo {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime: &'static str,
}

#[derive(Debug, Clone)]
pub(crate) struct ServiceClient {
    client: Client,
    base: Url,
}

impl ServiceClient {
    pub(crate) fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("resnap-cli/0.1")
            .build()?;
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .with_context(|| format!("invalid service url: {base_url}"))?;
        Ok(Self { client, base })
    }

    /// Names the item in `photo`. Never fails: any error degrades to
    /// [`CLIENT_UNKNOWN_ITEM`] so the lookup can still run.
    pub(crate) async fn caption(&self, photo: &Photo) -> String {
        match self.try_caption(photo).await {
            Ok(caption) if !caption.trim().is_empty() => caption.trim().to_owned(),
            Ok(_) => CLIENT_UNKNOWN_ITEM.to_owned(),
            Err(e) => {
                tracing::warn!(error = %e, file = %photo.file_name, "caption request failed");
                CLIENT_UNKNOWN_ITEM.to_owned()
            }
        }
    }

    async fn try_caption(&self, photo: &Photo) -> anyhow::Result<String> {
        let part = multipart::Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(photo.mime)?;
        let form = multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(self.endpoint("caption")?)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;
        let body: CaptionResponse = response.json().await?;
        Ok(body.caption)
    }

    /// Fetches comparable listings and the price estimate for `term`.
    pub(crate) async fn lookup(
        &self,
        term: &str,
        condition: Condition,
    ) -> anyhow::Result<LookupResponse> {
        let response = self
            .client
            .post(self.endpoint("lookup")?)
            .json(&LookupRequest {
                search_term: term,
                condition: condition.label(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("lookup service returned {status}: {body}");
        }
        response
            .json()
            .await
            .context("malformed lookup response")
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        Ok(self.base.join(path)?)
    }
}

/// Image MIME type from a file extension, defaulting to JPEG.
pub(crate) fn mime_for_path(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
