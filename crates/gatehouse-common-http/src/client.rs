// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

/// Creates a new HTTP client builder with the standard Gatehouse User-Agent header.
///
/// Use this when you need to customize the client beyond a timeout.
///
/// # Example
/// ```ignore
/// let client = gatehouse_common_http::builder()
///     .connect_timeout(Duration::from_millis(500))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Builds an HTTP client with the standard User-Agent and a total request timeout.
///
/// The timeout covers connect, send and body read. Callers that must fail
/// closed on a slow upstream should keep it short.
pub fn build_client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
	debug!(timeout_ms = timeout.as_millis() as u64, "building http client");
	builder().timeout(timeout).build()
}

/// Returns the standard Gatehouse User-Agent string.
///
/// Format: `gatehouse/{version}`
pub fn user_agent() -> String {
	format!("gatehouse/{}", env!("CARGO_PKG_VERSION"))
}
