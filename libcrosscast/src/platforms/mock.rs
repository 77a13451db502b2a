//! Mock publisher for testing
//!
//! A configurable publisher that can simulate successes, failures, and
//! latency, while counting calls and capturing published content. Used by
//! dispatcher and gateway tests to verify fan-out logic without credentials
//! or network access.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::sleep;

use crate::error::PlatformError;
use crate::platforms::{PublishResult, Publisher};

/// Configuration for mock publisher behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Canonical-style display name reported by the publisher
    pub name: &'static str,

    /// Payload resolved on success
    pub data: Value,

    /// Error returned instead, when set
    pub error: Option<PlatformError>,

    /// Delay before completing (simulates network latency)
    pub delay: Duration,

    /// Number of times publish has been called
    pub publish_call_count: Arc<Mutex<usize>>,

    /// Content that has been published (for verification)
    pub published_content: Arc<Mutex<Vec<String>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "Mock",
            data: Value::Null,
            error: None,
            delay: Duration::from_millis(0),
            publish_call_count: Arc::new(Mutex::new(0)),
            published_content: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock publisher for testing
pub struct MockPublisher {
    config: MockConfig,
}

impl MockPublisher {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// A publisher that always succeeds with the given payload
    pub fn success(name: &'static str, data: Value) -> Self {
        Self::new(MockConfig {
            name,
            data,
            ..Default::default()
        })
    }

    /// A publisher that always fails with the given error
    pub fn failure(name: &'static str, error: PlatformError) -> Self {
        Self::new(MockConfig {
            name,
            error: Some(error),
            ..Default::default()
        })
    }

    /// A publisher that succeeds after a delay
    pub fn with_delay(name: &'static str, data: Value, delay: Duration) -> Self {
        Self::new(MockConfig {
            name,
            data,
            delay,
            ..Default::default()
        })
    }

    /// Handle for asserting how often publish was invoked
    pub fn call_count(&self) -> Arc<Mutex<usize>> {
        self.config.publish_call_count.clone()
    }

    /// Handle for asserting what content was published
    pub fn published(&self) -> Arc<Mutex<Vec<String>>> {
        self.config.published_content.clone()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(
        &self,
        content: &str,
        _media_url: Option<&str>,
        _link: Option<&str>,
    ) -> PublishResult {
        if let Ok(mut count) = self.config.publish_call_count.lock() {
            *count += 1;
        }

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        if let Some(error) = &self.config.error {
            return Err(error.clone());
        }

        if let Ok(mut published) = self.config.published_content.lock() {
            published.push(content.to_string());
        }

        Ok(self.config.data.clone())
    }

    fn name(&self) -> &'static str {
        self.config.name
    }
}
