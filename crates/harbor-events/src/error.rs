// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the event source client.

use thiserror::Error;

/// Errors that can occur while talking to the platform API.
///
/// HTTP-level (non-2xx) responses are deliberately absent here: those
/// are absorbed into the telemetry side channel and surface as an empty
/// fetch result, not as an error.
#[derive(Debug, Error)]
pub enum EventsError {
	/// Base URL is missing or invalid.
	#[error("invalid platform API base URL: {0}")]
	InvalidBaseUrl(String),

	/// Transport-level failure (DNS, connect, timeout).
	#[error("HTTP request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// A 2xx response body could not be decoded.
	#[error("failed to decode response from {url}: {source}")]
	Decode {
		url: String,
		#[source]
		source: serde_json::Error,
	},
}

/// Result type alias for event source operations.
pub type Result<T> = std::result::Result<T, EventsError>;
