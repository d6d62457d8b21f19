// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The Harbor telemetry daemon.
//!
//! A long-running poller that reads audit events from the platform API,
//! resolves them into enriched analytics events through API-driven
//! lookups, and forwards them to the telemetry backend. Transient
//! failures never crash the daemon or lose its place in the stream:
//!
//! - transport failures abort one tick (or one handler) and are retried
//!   by the next poll
//! - HTTP-level platform failures become `analytics error` records
//! - handler failures are logged, and the cursor keeps its ground
//!
//! See [`poller::Poller`] for the fetch→dispatch→advance-cursor loop.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod poller;
pub mod whitelist;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Args;
pub use dispatch::EventKind;
pub use error::{DispatchError, PollerError};
pub use handlers::HandlerContext;
pub use poller::Poller;
pub use whitelist::{BuildpackWhitelist, ServiceWhitelist, Whitelists};
