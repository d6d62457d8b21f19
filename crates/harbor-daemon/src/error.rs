// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the daemon pipeline.

use thiserror::Error;

use harbor_analytics::TelemetryError;
use harbor_events::EventsError;

/// A handler failed while processing one event.
///
/// Logged by the poll loop; never fatal to the loop, and never rolls
/// back the cursor advancement already made for the event.
#[derive(Debug, Error)]
pub enum DispatchError {
	#[error("enrichment fetch failed: {0}")]
	Events(#[from] EventsError),

	#[error("telemetry emission failed: {0}")]
	Telemetry(#[from] TelemetryError),
}

/// Startup-only poller failures.
#[derive(Debug, Error)]
pub enum PollerError {
	/// The initial cursor seed could not be fetched. Entering the loop
	/// without a baseline would replay the entire event history as
	/// telemetry on the first successful tick.
	#[error("failed to seed cursor from event stream: {0}")]
	Seed(#[from] EventsError),
}
