// GitHub API module.
// Provides the transport, error classification, and response types for the REST API.

pub mod client;
pub mod endpoints;
#[cfg(test)]
pub mod fake;
pub mod types;

pub use client::{ApiRequest, ApiResponse, HttpTransport, Transport, check_response};
pub use types::*;
