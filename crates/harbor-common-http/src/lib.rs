// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Harbor.
//!
//! This crate provides a pre-configured HTTP client with a consistent
//! User-Agent header and timeout handling, used by every Harbor crate
//! that talks to the platform API or the telemetry backend.

mod client;

pub use client::{builder, new_client, new_client_with_timeout, platform, user_agent};
