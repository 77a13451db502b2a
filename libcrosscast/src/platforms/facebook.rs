//! Facebook platform implementation
//!
//! Single-step publish to the Graph API feed edge with a page access token.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::FacebookCredentials;
use crate::error::PlatformError;
use crate::platforms::{http_client, map_transport_error, read_json_response, PublishResult, Publisher};

const GRAPH_API_URL: &str = "https://graph.facebook.com";

pub struct FacebookPublisher {
    credentials: Option<FacebookCredentials>,
    client: reqwest::Client,
    base_url: String,
}

impl FacebookPublisher {
    pub fn new(credentials: Option<FacebookCredentials>) -> Self {
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
impl Publisher for FacebookPublisher {
    async fn publish(
        &self,
        content: &str,
        media_url: Option<&str>,
        link: Option<&str>,
    ) -> PublishResult {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            PlatformError::MissingCredential("Facebook access token not configured".to_string())
        })?;

        let mut body = json!({
            "message": content,
            "access_token": credentials.access_token,
        });
        if let Some(link) = link {
            body["link"] = Value::String(link.to_string());
        }
        if let Some(picture) = media_url {
            body["picture"] = Value::String(picture.to_string());
        }

        let response = self
            .client
            .post(format!("{}/me/feed", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        read_json_response(response).await
    }

    fn name(&self) -> &'static str {
        "Facebook"
    }
}
