// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Audit-event source client for Harbor.
//!
//! This crate fetches and decodes audit events from the platform API:
//!
//! - [`Event`]: a typed audit record (kind, timestamp, opaque payload)
//! - [`EventSourceClient`]: cursor-filtered, pagination-following event
//!   fetch plus the generic enrichment fetch used by handlers
//!
//! HTTP-level failures from the platform never propagate: they are
//! reported through the telemetry sink as `analytics error` records and
//! the affected fetch yields no data. Transport-level failures do
//! propagate, and the poll loop retries them on its next tick.

pub mod client;
pub mod error;
pub mod event;

pub use client::{EventSourceClient, EventSourceClientBuilder};
pub use error::{EventsError, Result};
pub use event::{kinds, Event, AUDIT_EVENT_KINDS};
