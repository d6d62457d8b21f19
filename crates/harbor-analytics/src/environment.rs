// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Reporting identity and the properties derived from it.
//!
//! Every record the daemon emits carries the same identity block: the
//! anonymized user id, the client version, the OS name and OS version,
//! and whether an outbound proxy is configured. The proxy flag is probed
//! from the process environment at emission time, not cached, so records
//! reflect proxy changes made while the daemon is running.

use crate::properties::Properties;

/// Environment variables consulted for the proxy-presence flag.
const PROXY_ENV_VARS: &[&str] = &["HTTPS_PROXY", "https_proxy", "HTTP_PROXY", "http_proxy"];

/// The identity attached to every outbound telemetry record.
#[derive(Debug, Clone)]
pub struct Environment {
	/// Anonymized id of the reporting installation.
	pub user_id: String,
	/// Client version, e.g. "0.1.0".
	pub version: String,
	/// OS version string as reported by the host, e.g. "6.8.0".
	pub os_version: String,
}

impl Environment {
	pub fn new(
		user_id: impl Into<String>,
		version: impl Into<String>,
		os_version: impl Into<String>,
	) -> Self {
		Self {
			user_id: user_id.into(),
			version: version.into(),
			os_version: os_version.into(),
		}
	}

	/// OS name of the host, e.g. "linux" or "macos".
	pub fn os(&self) -> &'static str {
		std::env::consts::OS
	}

	/// Returns true if an outbound HTTP(S) proxy is configured.
	///
	/// Probed from the process environment on every call.
	pub fn proxy_present(&self) -> bool {
		PROXY_ENV_VARS
			.iter()
			.any(|var| std::env::var(var).map(|v| !v.is_empty()).unwrap_or(false))
	}

	/// The base property set merged into every record.
	pub fn base_properties(&self) -> Properties {
		Properties::new()
			.insert("os", self.os())
			.insert("version", self.version.as_str())
			.insert("os_version", self.os_version.as_str())
			.insert("proxy", self.proxy_present())
	}
}
