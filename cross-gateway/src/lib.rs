//! cross-gateway - HTTP boundary for the Crosscast publishing dispatcher
//!
//! Exposed as a library so integration tests can drive the router directly.

pub mod app;
