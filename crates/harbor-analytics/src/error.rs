// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the telemetry sink SDK.

use thiserror::Error;

/// Telemetry SDK errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
	/// Base URL is missing or invalid.
	#[error("invalid telemetry base URL: {0}")]
	InvalidBaseUrl(String),

	/// HTTP request failed at the transport level.
	#[error("HTTP request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// Backend returned an error response.
	#[error("telemetry backend error ({status}): {message}")]
	Server { status: u16, message: String },

	/// Record could not be serialized.
	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Result type alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;
