// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Typed audit events and their wire representation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

/// Audit-event kind strings emitted by the platform API.
pub mod kinds {
	pub const APP_CREATE: &str = "audit.app.create";
	pub const APP_CRASH: &str = "app.crash";
	pub const APP_RESTAGE: &str = "audit.app.restage";
	pub const ORG_CREATE: &str = "audit.organization.create";
	pub const SPACE_CREATE: &str = "audit.space.create";
	pub const ROUTE_CREATE: &str = "audit.route.create";
	pub const SERVICE_INSTANCE_CREATE: &str = "audit.service_instance.create";
	pub const SERVICE_BINDING_CREATE: &str = "audit.service_binding.create";
	pub const USER_PROVIDED_SERVICE_CREATE: &str = "audit.user_provided_service_instance.create";
	pub const SERVICE_BROKER_CREATE: &str = "audit.service_broker.create";
}

/// The kinds requested from the platform in the event-listing filter.
///
/// The platform emits many more audit kinds than the pipeline consumes;
/// filtering server-side keeps pages small.
pub const AUDIT_EVENT_KINDS: &[&str] = &[
	kinds::APP_CREATE,
	kinds::APP_CRASH,
	kinds::APP_RESTAGE,
	kinds::ORG_CREATE,
	kinds::SPACE_CREATE,
	kinds::ROUTE_CREATE,
	kinds::SERVICE_INSTANCE_CREATE,
	kinds::SERVICE_BINDING_CREATE,
	kinds::USER_PROVIDED_SERVICE_CREATE,
	kinds::SERVICE_BROKER_CREATE,
];

/// A decoded audit event.
///
/// The payload is the audit record's `metadata` value; it is opaque to
/// the poller and interpreted only by the handler matching `kind`.
#[derive(Debug, Clone)]
pub struct Event {
	pub kind: String,
	pub occurred_at: DateTime<Utc>,
	pub payload: serde_json::Value,
}

/// One page of the `/v2/events` listing.
#[derive(Debug, Deserialize)]
pub struct EventPage {
	pub next_url: Option<String>,
	#[serde(default)]
	pub resources: Vec<EventResource>,
}

#[derive(Debug, Deserialize)]
pub struct EventResource {
	pub entity: EventEntity,
}

#[derive(Debug, Deserialize)]
pub struct EventEntity {
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub timestamp: String,
	#[serde(default)]
	pub metadata: serde_json::Value,
}

impl EventResource {
	/// Converts the wire record into a typed [`Event`].
	///
	/// A timestamp that fails RFC3339 parsing becomes the Unix epoch so
	/// the event still flows through the pipeline; the parse failure is
	/// logged. Epoch-valued events can never advance the poll cursor.
	pub fn into_event(self) -> Event {
		let entity = self.entity;
		let occurred_at = match DateTime::parse_from_rfc3339(&entity.timestamp) {
			Ok(ts) => ts.with_timezone(&Utc),
			Err(err) => {
				warn!(
					kind = %entity.kind,
					timestamp = %entity.timestamp,
					error = %err,
					"Malformed event timestamp, treating as epoch"
				);
				DateTime::<Utc>::UNIX_EPOCH
			}
		};

		Event {
			kind: entity.kind,
			occurred_at,
			payload: entity.metadata,
		}
	}
}
