// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Daemon configuration.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use harbor_analytics::{Environment, HttpSink, NoopSink, TelemetryError, TelemetrySink};

/// Harbor telemetry daemon.
///
/// Polls the platform's audit-event API and forwards enriched analytics
/// events to the telemetry backend.
#[derive(Debug, Parser)]
#[command(name = "harbor-daemon", version)]
pub struct Args {
	/// Platform API base URL.
	#[arg(long, env = "HARBOR_API_URL")]
	pub api_url: String,

	/// Seconds between poll ticks.
	#[arg(long, env = "HARBOR_POLL_INTERVAL", default_value_t = 60)]
	pub poll_interval: u64,

	/// Telemetry backend write key. Telemetry is disabled when unset.
	#[arg(long, env = "HARBOR_WRITE_KEY")]
	pub write_key: Option<String>,

	/// Telemetry backend base URL override.
	#[arg(long, env = "HARBOR_TELEMETRY_URL")]
	pub telemetry_url: Option<String>,

	/// Anonymized installation id attached to every record.
	#[arg(long, env = "HARBOR_USER_ID")]
	pub user_id: String,

	/// Host OS version reported with every record.
	#[arg(long, env = "HARBOR_OS_VERSION", default_value = "")]
	pub os_version: String,

	/// Seconds before a platform API request times out.
	#[arg(long, env = "HARBOR_REQUEST_TIMEOUT", default_value_t = 30)]
	pub request_timeout: u64,
}

impl Args {
	pub fn poll_interval(&self) -> Duration {
		Duration::from_secs(self.poll_interval)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout)
	}

	/// The reporting identity derived from the arguments.
	pub fn environment(&self) -> Environment {
		Environment::new(
			self.user_id.as_str(),
			env!("CARGO_PKG_VERSION"),
			self.os_version.as_str(),
		)
	}

	/// Constructs the telemetry sink: the HTTP backend when a write key
	/// is configured, the noop sink otherwise.
	pub fn sink(&self) -> Result<Arc<dyn TelemetrySink>, TelemetryError> {
		match &self.write_key {
			Some(key) => {
				let mut builder = HttpSink::builder().write_key(key.as_str());
				if let Some(url) = &self.telemetry_url {
					builder = builder.base_url(url.as_str());
				}
				Ok(Arc::new(builder.build()?))
			}
			None => Ok(Arc::new(NoopSink)),
		}
	}
}
