//! Instagram platform implementation
//!
//! Two-step Graph API publish: create a media container from a public image
//! URL, then publish the container. Instagram posts are media-centric, so a
//! request without a media URL is rejected before any network call.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::config::InstagramCredentials;
use crate::error::PlatformError;
use crate::platforms::{http_client, map_transport_error, read_json_response, PublishResult, Publisher};

const GRAPH_API_URL: &str = "https://graph.facebook.com";

pub struct InstagramPublisher {
    credentials: Option<InstagramCredentials>,
    client: reqwest::Client,
    base_url: String,
}

impl InstagramPublisher {
    pub fn new(credentials: Option<InstagramCredentials>) -> Self {
        Self {
            credentials,
            client: http_client(),
            base_url: GRAPH_API_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Publisher for InstagramPublisher {
    async fn publish(
        &self,
        content: &str,
        media_url: Option<&str>,
        _link: Option<&str>,
    ) -> PublishResult {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            PlatformError::MissingCredential("Instagram access token not configured".to_string())
        })?;

        let image_url = media_url.ok_or_else(|| {
            PlatformError::Precondition("Instagram requires an image or video".to_string())
        })?;

        // Step 1: create the media container.
        let response = self
            .client
            .post(format!("{}/me/media", self.base_url))
            .json(&json!({
                "image_url": image_url,
                "caption": content,
                "access_token": credentials.access_token,
            }))
            .send()
            .await
            .map_err(map_transport_error)?;
        let container = read_json_response(response).await?;

        let creation_id = container
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| {
                PlatformError::UnexpectedResponse(
                    "media container response carried no id".to_string(),
                )
            })?;
        debug!("created Instagram media container {creation_id}");

        // Step 2: publish the container.
        let response = self
            .client
            .post(format!("{}/me/media_publish", self.base_url))
            .json(&json!({
                "creation_id": creation_id,
                "access_token": credentials.access_token,
            }))
            .send()
            .await
            .map_err(map_transport_error)?;

        read_json_response(response).await
    }

    fn name(&self) -> &'static str {
        "Instagram"
    }
}
