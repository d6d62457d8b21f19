// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Telemetry sink SDK for Harbor.
//!
//! This crate provides:
//! - [`TelemetryRecord`]: a named event with a string-keyed property bag
//! - [`Properties`]: builder for event properties
//! - [`Environment`]: the reporting identity (user id, client version,
//!   OS version) and the properties derived from it
//! - [`TelemetrySink`]: the emission trait, with [`HttpSink`] forwarding
//!   records to the telemetry backend and [`NoopSink`] for opted-out runs

pub mod environment;
pub mod error;
pub mod properties;
pub mod record;
pub mod sink;

pub use environment::Environment;
pub use error::{Result, TelemetryError};
pub use properties::Properties;
pub use record::TelemetryRecord;
pub use sink::{HttpSink, HttpSinkBuilder, NoopSink, TelemetrySink};

/// Event name used when a platform API fetch fails with an HTTP error
/// and the failure is reported as telemetry instead of propagated.
pub const ANALYTICS_ERROR_EVENT: &str = "analytics error";
