//! HTTP client for an Azure `OpenAI` vision deployment used to name the item
//! in a photo.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, Url};

use crate::error::VisionError;
use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl, MessageContent, Role,
};

const SYSTEM_PROMPT: &str = "You are a helpful assistant and expert product identifier. \
Describe exactly what the subject item in this image is, down to the brand (if applicable). \
Keep descriptions down to a single phrase specifying what an item is (ex. Ikea Gunde chair). \
If you don't know exactly what an item is, keep the description down to what you know \
(ex. black folding chair). If you have no idea what an item is, return 'unknown item'.";

const USER_PROMPT: &str = "What is this? Give a specific product name or brand if possible.";

const MAX_TOKENS: u32 = 4096;

/// Client for the chat-completions endpoint of one Azure `OpenAI` deployment.
pub struct VisionClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    deployment: String,
    api_version: String,
}

impl VisionClient {
    /// Creates a client for `deployment` under the resource at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`VisionError::InvalidEndpoint`] if `endpoint` does not parse.
    pub fn new(
        endpoint: &str,
        api_key: &str,
        deployment: &str,
        api_version: &str,
        timeout_secs: u64,
    ) -> Result<Self, VisionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("resnap/0.1 (price-lookup)")
            .build()?;

        let normalised = format!("{}/", endpoint.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised).map_err(|e| VisionError::InvalidEndpoint {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_owned(),
            deployment: deployment.to_owned(),
            api_version: api_version.to_owned(),
        })
    }

    /// Asks the model for a one-phrase description of the item in `image`.
    ///
    /// The returned caption may itself be `"unknown item"` when the model
    /// cannot identify anything; that is a successful answer.
    ///
    /// # Errors
    ///
    /// - [`VisionError::UnexpectedStatus`] on a non-2xx response.
    /// - [`VisionError::Http`] on network failure.
    /// - [`VisionError::Deserialize`] if the response is malformed.
    /// - [`VisionError::EmptyCaption`] if no choice carries text.
    pub async fn describe_image(
        &self,
        image: &[u8],
        content_type: Option<&str>,
    ) -> Result<String, VisionError> {
        let request = build_request(image_data_url(image, content_type));
        let url = self.completions_url();

        let response = self
            .client
            .post(url)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(VisionError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| VisionError::Deserialize {
                context: format!("chat/completions(deployment={})", self.deployment),
                source: e,
            })?;

        let caption = parsed.first_text().ok_or(VisionError::EmptyCaption)?;
        tracing::debug!(caption, bytes = image.len(), "image captioned");
        Ok(caption.to_owned())
    }

    fn completions_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.set_path(&format!(
            "{}openai/deployments/{}/chat/completions",
            self.endpoint.path(),
            self.deployment
        ));
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        url
    }
}

/// Inline `data:` URL for an image. Non-image or missing content types are
/// sent as JPEG.
#[must_use]
pub fn image_data_url(image: &[u8], content_type: Option<&str>) -> String {
    let mime = content_type
        .filter(|ct| ct.starts_with("image/"))
        .unwrap_or("image/jpeg");
    format!("data:{mime};base64,{}", STANDARD.encode(image))
}

fn build_request(data_url: String) -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: MessageContent::Text(SYSTEM_PROMPT.to_owned()),
            },
            ChatMessage {
                role: Role::User,
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: USER_PROMPT.to_owned(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ]),
            },
        ],
        max_tokens: MAX_TOKENS,
        temperature: 0.0,
        top_p: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(endpoint: &str) -> VisionClient {
        VisionClient::new(endpoint, "key", "gpt-4o", "2024-04-01-preview", 30)
            .expect("client construction should not fail")
    }

    #[test]
    fn completions_url_targets_deployment() {
        let client = test_client("https://example.openai.azure.com/");
        assert_eq!(
            client.completions_url().as_str(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-04-01-preview"
        );
    }

    #[test]
    fn image_data_url_defaults_to_jpeg() {
        assert_eq!(image_data_url(b"abc", None), "data:image/jpeg;base64,YWJj");
        assert_eq!(
            image_data_url(b"abc", Some("application/octet-stream")),
            "data:image/jpeg;base64,YWJj"
        );
        assert_eq!(
            image_data_url(b"abc", Some("image/png")),
            "data:image/png;base64,YWJj"
        );
    }

    #[test]
    fn request_serializes_multimodal_user_message() {
        let json = serde_json::to_value(build_request("data:image/jpeg;base64,AA==".into()))
            .expect("serialize");
        assert_eq!(json["messages"][0]["role"], "system");
        assert!(json["messages"][0]["content"].is_string());
        assert_eq!(json["messages"][1]["content"][0]["type"], "text");
        assert_eq!(json["messages"][1]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,AA=="
        );
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["max_tokens"], 4096);
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let result = VisionClient::new("::nope::", "k", "d", "v", 5);
        assert!(matches!(result, Err(VisionError::InvalidEndpoint { .. })));
    }
}
