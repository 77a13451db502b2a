//! Platform abstraction and implementations
//!
//! One publisher per social network, each implementing the same contract
//! against that platform's native API: Twitter (OAuth 1.0a signed),
//! Facebook and Instagram (Graph API), LinkedIn (UGC posts), and Pinterest
//! (pins). Publishers are constructed with their credentials injected; a
//! publisher whose credentials are absent fails its own publishes and
//! nothing else.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::PlatformError;

pub mod facebook;
pub mod instagram;
pub mod linkedin;
pub mod pinterest;
pub mod twitter;

// Mock publisher is available for all builds to support integration tests.
pub mod mock;

/// Outcome of one publish attempt against one platform.
pub type PublishResult = std::result::Result<Value, PlatformError>;

/// Per-request network timeout applied by every publisher.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Publisher contract shared by all platforms.
///
/// `publish` runs the platform's full native protocol (one request for
/// Facebook, two for Instagram, three for LinkedIn) and resolves to the
/// platform's opaque success payload. Publishers that have no use for
/// `media_url` or `link` ignore them.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(
        &self,
        content: &str,
        media_url: Option<&str>,
        link: Option<&str>,
    ) -> PublishResult;

    /// Canonical display name (e.g. "Twitter").
    fn name(&self) -> &'static str;
}

/// HTTP client shared by the real publishers.
///
/// The builder only sets a timeout and cannot fail in practice; the
/// fallback keeps construction infallible.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Map a transport-level failure (connect, DNS, timeout) to a platform error.
pub(crate) fn map_transport_error(error: reqwest::Error) -> PlatformError {
    PlatformError::Network(error.to_string())
}

/// Read a platform response: non-2xx becomes `PlatformError::Api` carrying
/// the status code and raw body; a 2xx body is parsed as JSON, falling back
/// to the raw text for platforms that answer with something else.
pub(crate) async fn read_json_response(response: reqwest::Response) -> PublishResult {
    let status = response.status();
    let body = response.text().await.map_err(map_transport_error)?;

    if !status.is_success() {
        return Err(PlatformError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
}
