// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Platform string in `{os}-{arch}` format, e.g. "linux-x86_64".
pub fn platform() -> String {
	format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

/// Creates a new HTTP client with the standard Harbor User-Agent header.
pub fn new_client() -> Client {
	builder().build().expect("failed to build HTTP client")
}

/// Creates a new HTTP client builder with the standard Harbor User-Agent header.
///
/// Use this when you need to customize the client (e.g., set timeout).
///
/// # Example
/// ```ignore
/// let client = harbor_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a new HTTP client with a custom timeout and the standard User-Agent.
pub fn new_client_with_timeout(timeout: Duration) -> Client {
	builder()
		.timeout(timeout)
		.build()
		.expect("failed to build HTTP client")
}

/// Returns the standard Harbor User-Agent string.
///
/// Format: `harbor/{platform}/{version}`
/// Example: `harbor/linux-x86_64/0.1.0`
pub fn user_agent() -> String {
	format!("harbor/{}/{}", platform(), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		assert!(ua.starts_with("harbor/"));
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0], "harbor");
	}

	#[test]
	fn platform_contains_os_and_arch() {
		let p = platform();
		assert!(p.contains('-'));
		assert!(p.starts_with(std::env::consts::OS));
	}

	#[test]
	fn builder_with_timeout_builds() {
		let client = builder().timeout(Duration::from_secs(5)).build();
		assert!(client.is_ok());
	}
}
