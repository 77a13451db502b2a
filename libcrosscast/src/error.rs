//! Error types for Crosscast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrosscastError>;

#[derive(Error, Debug)]
pub enum CrosscastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid configuration value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Per-platform publish failure.
///
/// Every variant becomes the `error` string of one `PlatformResult`; none of
/// them ever crosses the orchestrator boundary as an exception. `Clone` so a
/// single failure can be both logged and recorded.
#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    /// A credential the platform requires is absent from the configuration.
    #[error("{0}")]
    MissingCredential(String),

    /// The request cannot be attempted at all (e.g. a pin without an image).
    #[error("{0}")]
    Precondition(String),

    /// The platform API answered with a non-2xx status.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// The platform answered 2xx but the payload is missing what the
    /// protocol needs next (e.g. no container id from Instagram step one).
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Request signing failed before anything was sent.
    #[error("Request signing failed: {0}")]
    Signing(String),

    #[error("Network error: {0}")]
    Network(String),

    /// The requested identifier matches no known platform.
    #[error("Platform {0} not supported or not configured")]
    Unsupported(String),
}
