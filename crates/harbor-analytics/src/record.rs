// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The outbound telemetry record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::properties::Properties;

/// A named event plus property bag, consumed exactly once by a sink.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryRecord {
	pub user_id: String,
	#[serde(rename = "event")]
	pub event_name: String,
	pub timestamp: DateTime<Utc>,
	pub properties: Properties,
}

impl TelemetryRecord {
	pub fn new(
		user_id: impl Into<String>,
		event_name: impl Into<String>,
		timestamp: DateTime<Utc>,
		properties: Properties,
	) -> Self {
		Self {
			user_id: user_id.into(),
			event_name: event_name.into(),
			timestamp,
			properties,
		}
	}
}
