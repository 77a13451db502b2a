//! Twitter platform implementation
//!
//! Posts through the v2 tweet endpoint with an OAuth 1.0a signed request
//! (fixed user-context token, no live handshake). The tweet body is JSON,
//! so only the OAuth parameters participate in the signature base.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::config::TwitterCredentials;
use crate::error::PlatformError;
use crate::oauth::OAuth1Signer;
use crate::platforms::{http_client, map_transport_error, read_json_response, PublishResult, Publisher};

const TWITTER_API_URL: &str = "https://api.twitter.com";

pub struct TwitterPublisher {
    credentials: Option<TwitterCredentials>,
    client: reqwest::Client,
    base_url: String,
}

impl TwitterPublisher {
    pub fn new(credentials: Option<TwitterCredentials>) -> Self {
        Self {
            credentials,
            client: http_client(),
            base_url: TWITTER_API_URL.to_string(),
        }
    }

    /// Point the publisher at a different API host (tests).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Publisher for TwitterPublisher {
    async fn publish(
        &self,
        content: &str,
        media_url: Option<&str>,
        link: Option<&str>,
    ) -> PublishResult {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            PlatformError::MissingCredential("Twitter API credentials not configured".to_string())
        })?;

        // Known limitation: attaching media to a tweet needs a separate
        // media-upload call first; this publisher only records the URL.
        if let Some(url) = media_url {
            debug!("Twitter publisher does not upload media; ignoring {url}");
        }

        let text = match link {
            Some(link) => format!("{content} {link}"),
            None => content.to_string(),
        };

        let url = format!("{}/2/tweets", self.base_url);
        let signer = OAuth1Signer::new(credentials);
        let authorization = signer.authorization_header("POST", &url, &[])?;

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(map_transport_error)?;

        read_json_response(response).await
    }

    fn name(&self) -> &'static str {
        "Twitter"
    }
}
