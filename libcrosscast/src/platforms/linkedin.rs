//! LinkedIn platform implementation
//!
//! Publishes a UGC post with bearer auth. The member URN is not part of the
//! token, so each publish first resolves the caller's person id, then posts
//! the share. A media URL or link turns the share into an ARTICLE with one
//! attached media entry; otherwise the share carries text only.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::LinkedInCredentials;
use crate::error::PlatformError;
use crate::platforms::{http_client, map_transport_error, read_json_response, PublishResult, Publisher};

const LINKEDIN_API_URL: &str = "https://api.linkedin.com";

pub struct LinkedInPublisher {
    credentials: Option<LinkedInCredentials>,
    client: reqwest::Client,
    base_url: String,
}

impl LinkedInPublisher {
    pub fn new(credentials: Option<LinkedInCredentials>) -> Self {
        Self {
            credentials,
            client: http_client(),
            base_url: LINKEDIN_API_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve the person id behind the access token.
    async fn person_id(&self, access_token: &str) -> Result<String, PlatformError> {
        let response = self
            .client
            .get(format!("{}/v2/people/(id~)", self.base_url))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_transport_error)?;
        let profile = read_json_response(response).await?;

        profile
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                PlatformError::UnexpectedResponse("profile response carried no id".to_string())
            })
    }

    fn ugc_payload(person_id: &str, content: &str, original_url: Option<&str>) -> Value {
        let share_content = match original_url {
            Some(url) => json!({
                "shareCommentary": { "text": content },
                "shareMediaCategory": "ARTICLE",
                "media": [{
                    "status": "READY",
                    "description": { "text": content },
                    "originalUrl": url,
                    "title": { "text": "Shared Content" },
                }],
            }),
            None => json!({
                "shareCommentary": { "text": content },
                "shareMediaCategory": "NONE",
            }),
        };

        json!({
            "author": format!("urn:li:person:{person_id}"),
            "lifecycleState": "PUBLISHED",
            "specificContent": { "com.linkedin.ugc.ShareContent": share_content },
            "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC" },
        })
    }
}

#[async_trait]
impl Publisher for LinkedInPublisher {
    async fn publish(
        &self,
        content: &str,
        media_url: Option<&str>,
        link: Option<&str>,
    ) -> PublishResult {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            PlatformError::MissingCredential("LinkedIn access token not configured".to_string())
        })?;

        let person_id = self.person_id(&credentials.access_token).await?;
        debug!("resolved LinkedIn person id {person_id}");

        // A link takes precedence over a media URL as the article target.
        let original_url = link.or(media_url);
        let payload = Self::ugc_payload(&person_id, content, original_url);

        let response = self
            .client
            .post(format!("{}/v2/ugcPosts", self.base_url))
            .bearer_auth(&credentials.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        read_json_response(response).await
    }

    fn name(&self) -> &'static str {
        "LinkedIn"
    }
}
