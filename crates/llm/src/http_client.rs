//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients shared by the
//! provider implementations.

use std::time::Duration;

/// Request timeout applied to every provider call. Generation responses can
/// be several thousand tokens, so this is generous.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Build a `reqwest::Client` configured for provider API calls.
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("failed to build reqwest client")
}
