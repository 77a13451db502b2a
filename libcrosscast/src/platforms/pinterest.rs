//! Pinterest platform implementation
//!
//! Creates a pin on a configured board. Pins are image-centric, so both the
//! board configuration and a media URL are hard preconditions.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::PinterestCredentials;
use crate::error::PlatformError;
use crate::platforms::{http_client, map_transport_error, read_json_response, PublishResult, Publisher};

const PINTEREST_API_URL: &str = "https://api.pinterest.com";

pub struct PinterestPublisher {
    credentials: Option<PinterestCredentials>,
    client: reqwest::Client,
    base_url: String,
}

impl PinterestPublisher {
    pub fn new(credentials: Option<PinterestCredentials>) -> Self {
        Self {
            credentials,
            client: http_client(),
            base_url: PINTEREST_API_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Publisher for PinterestPublisher {
    async fn publish(
        &self,
        content: &str,
        media_url: Option<&str>,
        link: Option<&str>,
    ) -> PublishResult {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            PlatformError::MissingCredential(
                "Pinterest access token and board id not configured".to_string(),
            )
        })?;

        let image_url = media_url.ok_or_else(|| {
            PlatformError::Precondition("Pinterest requires an image".to_string())
        })?;

        let mut body = json!({
            "board_id": credentials.board_id,
            "media_source": {
                "source_type": "image_url",
                "url": image_url,
            },
            "description": content,
        });
        if let Some(link) = link {
            body["link"] = Value::String(link.to_string());
        }

        let response = self
            .client
            .post(format!("{}/v5/pins", self.base_url))
            .bearer_auth(&credentials.access_token)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        read_json_response(response).await
    }

    fn name(&self) -> &'static str {
        "Pinterest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_credentials() -> PinterestCredentials {
        PinterestCredentials {
            access_token: "pin-token".to_string(),
            board_id: "board_42".to_string(),
        }
    }

    #[tokio::test]
    async fn test_publish_without_credentials_fails_immediately() {
        let publisher = PinterestPublisher::new(None);
        match publisher
            .publish("pin", Some("https://example.com/cat.jpg"), None)
            .await
        {
            Err(PlatformError::MissingCredential(msg)) => {
                assert!(msg.contains("Pinterest"));
            }
            other => panic!("expected MissingCredential, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_publish_requires_image() {
        let publisher = PinterestPublisher::new(Some(test_credentials()));
        match publisher.publish("pin", None, None).await {
            Err(PlatformError::Precondition(msg)) => {
                assert!(msg.contains("requires an image"));
            }
            other => panic!("expected Precondition, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_publish_creates_pin() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v5/pins"))
            .and(header("Authorization", "Bearer pin-token"))
            .and(body_partial_json(serde_json::json!({
                "board_id": "board_42",
                "media_source": {
                    "source_type": "image_url",
                    "url": "https://example.com/cat.jpg",
                },
                "description": "pin",
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "pin_1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let publisher =
            PinterestPublisher::new(Some(test_credentials())).with_base_url(server.uri());
        let data = publisher
            .publish("pin", Some("https://example.com/cat.jpg"), None)
            .await
            .unwrap();
        assert_eq!(data["id"], "pin_1");
    }

    #[tokio::test]
    async fn test_publish_attaches_link() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v5/pins"))
            .and(body_partial_json(serde_json::json!({"link": "https://example.com"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "pin_2"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let publisher =
            PinterestPublisher::new(Some(test_credentials())).with_base_url(server.uri());
        publisher
            .publish(
                "pin",
                Some("https://example.com/cat.jpg"),
                Some("https://example.com"),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_publish_surfaces_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v5/pins"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string(r#"{"message":"Too many requests"}"#),
            )
            .mount(&server)
            .await;

        let publisher =
            PinterestPublisher::new(Some(test_credentials())).with_base_url(server.uri());
        match publisher
            .publish("pin", Some("https://example.com/cat.jpg"), None)
            .await
        {
            Err(PlatformError::Api { status, body }) => {
                assert_eq!(status, 429);
                assert!(body.contains("Too many requests"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
