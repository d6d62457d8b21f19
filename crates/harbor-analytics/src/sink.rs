// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Sink trait and backend adapters for telemetry records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{Result, TelemetryError};
use crate::record::TelemetryRecord;

/// Default telemetry backend endpoint.
const DEFAULT_BASE_URL: &str = "https://api.segment.io";

/// Default request timeout for emissions.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Accepts telemetry records and forwards them to a backend.
///
/// Emit failures are returned to the caller, which logs them; they are
/// never retried and never block the pipeline.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
	async fn emit(&self, record: TelemetryRecord) -> Result<()>;
}

/// Builder for constructing an [`HttpSink`].
pub struct HttpSinkBuilder {
	write_key: Option<String>,
	base_url: Option<String>,
	timeout: Duration,
}

impl HttpSinkBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			write_key: None,
			base_url: None,
			timeout: DEFAULT_TIMEOUT,
		}
	}

	/// Sets the backend write key used as the basic-auth username.
	pub fn write_key(mut self, key: impl Into<String>) -> Self {
		self.write_key = Some(key.into());
		self
	}

	/// Sets the backend base URL.
	///
	/// Defaults to the hosted backend endpoint.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	/// Sets the HTTP request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Builds the sink.
	pub fn build(self) -> Result<HttpSink> {
		let base_url = self
			.base_url
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
			.trim_end_matches('/')
			.to_string();

		if base_url.is_empty() {
			return Err(TelemetryError::InvalidBaseUrl(base_url));
		}

		let http_client = harbor_common_http::builder()
			.timeout(self.timeout)
			.build()
			.map_err(TelemetryError::Request)?;

		Ok(HttpSink {
			write_key: self.write_key.unwrap_or_default(),
			base_url,
			http_client,
		})
	}
}

impl Default for HttpSinkBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Sink that posts records to the telemetry backend's track endpoint.
pub struct HttpSink {
	write_key: String,
	base_url: String,
	http_client: Client,
}

impl HttpSink {
	/// Creates a new builder for constructing an HttpSink.
	pub fn builder() -> HttpSinkBuilder {
		HttpSinkBuilder::new()
	}
}

#[async_trait]
impl TelemetrySink for HttpSink {
	async fn emit(&self, record: TelemetryRecord) -> Result<()> {
		let url = format!("{}/v1/track", self.base_url);

		debug!(event = %record.event_name, url = %url, "Emitting telemetry record");

		let response = self
			.http_client
			.post(&url)
			.basic_auth(&self.write_key, None::<&str>)
			.json(&record)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();
			return Err(TelemetryError::Server {
				status: status.as_u16(),
				message,
			});
		}

		Ok(())
	}
}

/// Sink used when telemetry is opted out: accepts and discards records.
#[derive(Debug, Clone, Default)]
pub struct NoopSink;

#[async_trait]
impl TelemetrySink for NoopSink {
	async fn emit(&self, record: TelemetryRecord) -> Result<()> {
		debug!(event = %record.event_name, "Telemetry disabled, dropping record");
		Ok(())
	}
}
