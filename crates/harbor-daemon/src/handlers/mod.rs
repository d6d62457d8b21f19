// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Enrichment handlers, one per recognized event kind.
//!
//! Every handler converts one raw audit event into zero or one
//! telemetry records. Simple handlers emit directly; the service
//! handlers make one or two follow-up lookups through the event source
//! client first, and suppress the emission when the resolved label is
//! not whitelisted.

pub mod app;
pub mod service;
pub mod simple;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use harbor_analytics::{Environment, Properties, TelemetryRecord, TelemetrySink};
use harbor_events::EventSourceClient;

use crate::error::DispatchError;
use crate::whitelist::Whitelists;

/// Telemetry event names emitted by the handlers.
pub mod names {
	pub const APP_CREATED: &str = "app created";
	pub const APP_CRASHED: &str = "app crashed";
	pub const APP_RESTAGED: &str = "app restaged";
	pub const ORG_CREATED: &str = "org created";
	pub const SPACE_CREATED: &str = "space created";
	pub const ROUTE_CREATED: &str = "route created";
	pub const SERVICE_CREATED: &str = "service created";
	pub const SERVICE_BOUND: &str = "service bound";
	pub const USER_PROVIDED_SERVICE_CREATED: &str = "user provided service created";
	pub const SERVICE_BROKER_CREATED: &str = "service broker created";
}

/// Immutable per-dispatch bundle shared read-only with handlers.
pub struct HandlerContext<'a> {
	/// Client for enrichment lookups; the same instance the poll loop
	/// fetches events with.
	pub client: &'a EventSourceClient,
	pub sink: &'a Arc<dyn TelemetrySink>,
	/// Cursor value as of this dispatch, already advanced for the event
	/// being handled.
	pub cursor: DateTime<Utc>,
	pub environment: &'a Environment,
	pub whitelists: &'a Whitelists,
}

impl HandlerContext<'_> {
	/// Builds and emits one record: base identity properties merged with
	/// the handler-specific ones, stamped with the cursor snapshot.
	pub async fn emit(&self, event_name: &str, extra: Properties) -> Result<(), DispatchError> {
		let record = TelemetryRecord::new(
			self.environment.user_id.clone(),
			event_name,
			self.cursor,
			self.environment.base_properties().merge(extra),
		);
		self.sink.emit(record).await?;
		Ok(())
	}
}

/// Decodes a kind-specific payload from the event's opaque metadata.
///
/// Malformed payloads decode to zero-valued fields rather than failing
/// the event; the fallback is logged so it stays observable.
pub(crate) fn decode_payload<T>(payload: &serde_json::Value) -> T
where
	T: DeserializeOwned + Default,
{
	match serde_json::from_value(payload.clone()) {
		Ok(decoded) => decoded,
		Err(err) => {
			debug!(error = %err, "Malformed event payload, using defaults");
			T::default()
		}
	}
}
