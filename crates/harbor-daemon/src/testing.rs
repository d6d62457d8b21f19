// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Test doubles shared by the daemon's unit tests.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use wiremock::MockServer;

use harbor_analytics::{Environment, TelemetryError, TelemetryRecord, TelemetrySink};
use harbor_events::EventSourceClient;

use crate::handlers::HandlerContext;
use crate::whitelist::Whitelists;

/// Sink that captures every emitted record for assertions.
#[derive(Default)]
pub(crate) struct RecordingSink {
	records: Mutex<Vec<TelemetryRecord>>,
}

impl RecordingSink {
	pub(crate) fn records(&self) -> Vec<TelemetryRecord> {
		self.records.lock().unwrap().clone()
	}
}

#[async_trait]
impl TelemetrySink for RecordingSink {
	async fn emit(&self, record: TelemetryRecord) -> harbor_analytics::Result<()> {
		self.records.lock().unwrap().push(record);
		Ok(())
	}
}

/// Sink that rejects every record, for handler-failure paths.
#[derive(Default)]
pub(crate) struct FailingSink;

#[async_trait]
impl TelemetrySink for FailingSink {
	async fn emit(&self, _record: TelemetryRecord) -> harbor_analytics::Result<()> {
		Err(TelemetryError::Server {
			status: 500,
			message: "sink rejected record".to_string(),
		})
	}
}

/// A wired-up pipeline against a mock platform API.
pub(crate) struct Fixture {
	pub(crate) server: MockServer,
	pub(crate) client: EventSourceClient,
	pub(crate) sink: Arc<RecordingSink>,
	sink_dyn: Arc<dyn TelemetrySink>,
	pub(crate) environment: Environment,
	pub(crate) whitelists: Whitelists,
	pub(crate) cursor: DateTime<Utc>,
}

impl Fixture {
	pub(crate) async fn new() -> Self {
		let server = MockServer::start().await;
		let sink = Arc::new(RecordingSink::default());
		let sink_dyn: Arc<dyn TelemetrySink> = Arc::clone(&sink) as Arc<dyn TelemetrySink>;
		let environment = Environment::new("user-1234", "0.1.0", "6.8.0");
		let client = EventSourceClient::builder()
			.base_url(server.uri())
			.sink(Arc::clone(&sink_dyn))
			.environment(environment.clone())
			.build()
			.expect("fixture client");

		Self {
			server,
			client,
			sink,
			sink_dyn,
			environment,
			whitelists: Whitelists::default(),
			cursor: Utc.with_ymd_and_hms(2018, 8, 9, 8, 8, 8).unwrap(),
		}
	}

	pub(crate) fn ctx(&self) -> HandlerContext<'_> {
		HandlerContext {
			client: &self.client,
			sink: &self.sink_dyn,
			cursor: self.cursor,
			environment: &self.environment,
			whitelists: &self.whitelists,
		}
	}
}
