//! Crosscast - multi-platform social publishing
//!
//! This library fans one piece of content out to several social networks,
//! each through its own native wire protocol, and collects a per-platform
//! success/failure report. Partial failure is a first-class outcome: one
//! platform's rejection never aborts the others.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod oauth;
pub mod platforms;
pub mod types;

// Re-export commonly used types
pub use config::Credentials;
pub use dispatch::Dispatcher;
pub use error::{CrosscastError, PlatformError, Result};
pub use types::{DispatchReport, PlatformId, PlatformResult, PublishRequest};
