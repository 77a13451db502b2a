//! Multi-platform dispatch orchestration
//!
//! Turns one publish request into one per-platform report without letting
//! any single platform's failure abort the others. Platforms are published
//! concurrently; the report's `results` keep the caller's platform order
//! regardless of completion order.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{info, warn};

use crate::config::Credentials;
use crate::error::{CrosscastError, PlatformError, Result};
use crate::platforms::{
    facebook::FacebookPublisher, instagram::InstagramPublisher, linkedin::LinkedInPublisher,
    pinterest::PinterestPublisher, twitter::TwitterPublisher, Publisher,
};
use crate::types::{
    DispatchReport, PlatformId, PlatformResult, PublishRequest, MISSING_REQUIRED_FIELDS,
};

/// Dispatch orchestrator holding one publisher per known platform.
pub struct Dispatcher {
    publishers: HashMap<PlatformId, Box<dyn Publisher>>,
}

impl Dispatcher {
    /// An empty dispatcher; every known platform resolves as unsupported
    /// until a publisher is registered. Tests assemble dispatchers this way.
    pub fn new() -> Self {
        Self {
            publishers: HashMap::new(),
        }
    }

    /// Register a publisher for one platform, replacing any existing one.
    pub fn with_publisher(mut self, id: PlatformId, publisher: Box<dyn Publisher>) -> Self {
        self.publishers.insert(id, publisher);
        self
    }

    /// Build the production dispatcher.
    ///
    /// Every platform is always registered; a platform whose credentials are
    /// absent fails its own publishes with a descriptive error instead of
    /// disappearing from the report.
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new()
            .with_publisher(
                PlatformId::Twitter,
                Box::new(TwitterPublisher::new(credentials.twitter.clone())),
            )
            .with_publisher(
                PlatformId::Facebook,
                Box::new(FacebookPublisher::new(credentials.facebook.clone())),
            )
            .with_publisher(
                PlatformId::Instagram,
                Box::new(InstagramPublisher::new(credentials.instagram.clone())),
            )
            .with_publisher(
                PlatformId::LinkedIn,
                Box::new(LinkedInPublisher::new(credentials.linkedin.clone())),
            )
            .with_publisher(
                PlatformId::Pinterest,
                Box::new(PinterestPublisher::new(credentials.pinterest.clone())),
            )
    }

    /// Fan one request out to every requested platform and collect results.
    ///
    /// # Errors
    ///
    /// Returns `CrosscastError::InvalidInput` if a required field is missing;
    /// nothing is dispatched in that case. Per-platform failures never
    /// surface as errors — they are recorded in the report's `results`.
    pub async fn dispatch(&self, request: &PublishRequest) -> Result<DispatchReport> {
        if !request.has_required_fields() {
            return Err(CrosscastError::InvalidInput(
                MISSING_REQUIRED_FIELDS.to_string(),
            ));
        }

        let dispatch_id = uuid::Uuid::new_v4();
        let content = request.normalized_content();
        info!(
            %dispatch_id,
            platforms = request.platforms.len(),
            "dispatching publish request"
        );

        let futures: Vec<_> = request
            .platforms
            .iter()
            .map(|identifier| {
                let content = content.clone();
                async move {
                    self.publish_one(identifier, &content, request)
                        .await
                }
            })
            .collect();

        // join_all keeps input order regardless of completion order.
        let results = join_all(futures).await;

        let success_count = results.iter().filter(|r| r.success).count();
        let message = format!(
            "Posted to {} out of {} platforms",
            success_count,
            request.platforms.len()
        );
        info!(%dispatch_id, "{message}");

        Ok(DispatchReport {
            success: true,
            results,
            message,
        })
    }

    /// Publish to a single requested platform, converting every failure into
    /// a result record.
    async fn publish_one(
        &self,
        identifier: &str,
        content: &str,
        request: &PublishRequest,
    ) -> PlatformResult {
        let (id, publisher) = match PlatformId::parse(identifier)
            .and_then(|id| self.publishers.get(&id).map(|publisher| (id, publisher)))
        {
            Some(found) => found,
            None => {
                warn!("unsupported platform identifier: {identifier}");
                return PlatformResult::failed(
                    identifier,
                    PlatformError::Unsupported(identifier.to_string()).to_string(),
                );
            }
        };
        match publisher
            .publish(
                content,
                request.media_url.as_deref(),
                request.link.as_deref(),
            )
            .await
        {
            Ok(data) => {
                info!("published to {}", id.canonical_name());
                PlatformResult::ok(id.canonical_name(), data)
            }
            Err(error) => {
                // The failure record keeps the identifier as the caller
                // wrote it; canonical names are for successes.
                warn!("publish to {} failed: {error}", id.canonical_name());
                PlatformResult::failed(identifier, error.to_string())
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::mock::MockPublisher;
    use serde_json::json;
    use std::time::Duration;

    fn request(platforms: &[&str]) -> PublishRequest {
        PublishRequest {
            content: "hello".to_string(),
            platforms: platforms.iter().map(|s| s.to_string()).collect(),
            user_id: "user-1".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_results_match_input_order_and_length() {
        let dispatcher = Dispatcher::new()
            .with_publisher(
                PlatformId::Twitter,
                Box::new(MockPublisher::with_delay(
                    "Twitter",
                    json!({"id": "t"}),
                    Duration::from_millis(50),
                )),
            )
            .with_publisher(
                PlatformId::Facebook,
                Box::new(MockPublisher::success("Facebook", json!({"id": "f"}))),
            );

        // The slow platform is listed first; order must still hold.
        let report = dispatcher
            .dispatch(&request(&["twitter", "facebook", "tiktok"]))
            .await
            .unwrap();

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results[0].platform, "Twitter");
        assert_eq!(report.results[1].platform, "Facebook");
        assert_eq!(report.results[2].platform, "tiktok");
    }

    #[tokio::test]
    async fn test_partial_failure_is_isolated() {
        let dispatcher = Dispatcher::new()
            .with_publisher(
                PlatformId::Twitter,
                Box::new(MockPublisher::failure(
                    "Twitter",
                    PlatformError::Api {
                        status: 500,
                        body: "server error".to_string(),
                    },
                )),
            )
            .with_publisher(
                PlatformId::Facebook,
                Box::new(MockPublisher::success("Facebook", json!({"id": "f"}))),
            );

        let report = dispatcher
            .dispatch(&request(&["Twitter", "Facebook"]))
            .await
            .unwrap();

        assert!(report.success);
        assert_eq!(report.message, "Posted to 1 out of 2 platforms");

        let twitter = &report.results[0];
        assert!(!twitter.success);
        // Failures keep the identifier exactly as the caller wrote it.
        assert_eq!(twitter.platform, "Twitter");
        assert!(twitter.error.as_ref().unwrap().contains("500"));
        assert!(twitter.data.is_none());

        let facebook = &report.results[1];
        assert!(facebook.success);
        assert_eq!(facebook.platform, "Facebook");
        assert!(facebook.error.is_none());
    }

    #[tokio::test]
    async fn test_unknown_platform_makes_no_calls() {
        let twitter = MockPublisher::success("Twitter", json!({"id": "t"}));
        let count = twitter.call_count();
        let dispatcher =
            Dispatcher::new().with_publisher(PlatformId::Twitter, Box::new(twitter));

        let report = dispatcher.dispatch(&request(&["tiktok"])).await.unwrap();

        assert_eq!(report.results.len(), 1);
        let result = &report.results[0];
        assert_eq!(result.platform, "tiktok");
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Platform tiktok not supported or not configured")
        );
        assert_eq!(report.message, "Posted to 0 out of 1 platforms");
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_content_rejects_before_any_publish() {
        let twitter = MockPublisher::success("Twitter", json!({"id": "t"}));
        let count = twitter.call_count();
        let dispatcher =
            Dispatcher::new().with_publisher(PlatformId::Twitter, Box::new(twitter));

        let mut bad = request(&["twitter"]);
        bad.content = String::new();

        match dispatcher.dispatch(&bad).await {
            Err(CrosscastError::InvalidInput(msg)) => {
                assert_eq!(msg, MISSING_REQUIRED_FIELDS);
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_alias_x_reports_canonical_name_on_success() {
        let dispatcher = Dispatcher::new().with_publisher(
            PlatformId::Twitter,
            Box::new(MockPublisher::success("Twitter", json!({"id": "t"}))),
        );

        let report = dispatcher.dispatch(&request(&["x"])).await.unwrap();
        assert_eq!(report.results[0].platform, "Twitter");
        assert!(report.results[0].success);
    }

    #[tokio::test]
    async fn test_publishers_receive_normalized_content() {
        let twitter = MockPublisher::success("Twitter", json!({"id": "t"}));
        let published = twitter.published();
        let dispatcher =
            Dispatcher::new().with_publisher(PlatformId::Twitter, Box::new(twitter));

        let mut req = request(&["twitter"]);
        req.hashtags = vec!["sale".to_string(), "#deals".to_string()];
        dispatcher.dispatch(&req).await.unwrap();

        assert_eq!(
            published.lock().unwrap().as_slice(),
            ["hello #sale #deals".to_string()]
        );
    }

    #[tokio::test]
    async fn test_registered_platform_without_publisher_is_unsupported() {
        let dispatcher = Dispatcher::new();
        let report = dispatcher.dispatch(&request(&["twitter"])).await.unwrap();
        assert_eq!(
            report.results[0].error.as_deref(),
            Some("Platform twitter not supported or not configured")
        );
    }

    #[tokio::test]
    async fn test_every_result_has_exactly_one_payload_field() {
        let dispatcher = Dispatcher::new().with_publisher(
            PlatformId::Facebook,
            Box::new(MockPublisher::success("Facebook", json!({"id": "f"}))),
        );

        let report = dispatcher
            .dispatch(&request(&["facebook", "tiktok"]))
            .await
            .unwrap();

        for result in &report.results {
            assert_eq!(result.success, result.data.is_some());
            assert_eq!(!result.success, result.error.is_some());
        }
    }
}
