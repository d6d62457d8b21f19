// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Client for the platform's audit-event and resource APIs.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use harbor_analytics::{Environment, TelemetryRecord, TelemetrySink, ANALYTICS_ERROR_EVENT};

use crate::error::{EventsError, Result};
use crate::event::{Event, EventPage, EventResource, AUDIT_EVENT_KINDS};

/// Default request timeout for platform API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for constructing an [`EventSourceClient`].
pub struct EventSourceClientBuilder {
	base_url: Option<String>,
	timeout: Duration,
	sink: Option<Arc<dyn TelemetrySink>>,
	environment: Option<Environment>,
}

impl EventSourceClientBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			base_url: None,
			timeout: DEFAULT_TIMEOUT,
			sink: None,
			environment: None,
		}
	}

	/// Sets the platform API base URL.
	///
	/// Example: `https://api.local.pcfdev.io`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	/// Sets the HTTP request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Sets the telemetry sink used to report absorbed HTTP failures.
	pub fn sink(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
		self.sink = Some(sink);
		self
	}

	/// Sets the reporting identity attached to failure reports.
	pub fn environment(mut self, environment: Environment) -> Self {
		self.environment = Some(environment);
		self
	}

	/// Builds the client.
	pub fn build(self) -> Result<EventSourceClient> {
		let base_url = self
			.base_url
			.filter(|url| !url.is_empty())
			.ok_or_else(|| EventsError::InvalidBaseUrl("<missing>".to_string()))?
			.trim_end_matches('/')
			.to_string();

		let sink = self
			.sink
			.unwrap_or_else(|| Arc::new(harbor_analytics::NoopSink));
		let environment = self
			.environment
			.unwrap_or_else(|| Environment::new("", env!("CARGO_PKG_VERSION"), ""));

		let http_client = harbor_common_http::builder()
			.timeout(self.timeout)
			.build()
			.map_err(EventsError::Request)?;

		Ok(EventSourceClient {
			inner: Arc::new(ClientInner {
				base_url,
				http_client,
				sink,
				environment,
			}),
		})
	}
}

impl Default for EventSourceClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct ClientInner {
	base_url: String,
	http_client: Client,
	sink: Arc<dyn TelemetrySink>,
	environment: Environment,
}

/// Fetches and decodes audit events and arbitrary platform resources.
///
/// The client holds no mutable state between calls, so one instance is
/// shared across the poll loop and every enrichment hop.
#[derive(Clone)]
pub struct EventSourceClient {
	inner: Arc<ClientInner>,
}

impl EventSourceClient {
	/// Creates a new builder for constructing an EventSourceClient.
	pub fn builder() -> EventSourceClientBuilder {
		EventSourceClientBuilder::new()
	}

	/// Fetches every audit event of a recognized kind, newer than `since`.
	///
	/// Follows `next_url` pagination until a page carries none, issuing
	/// the follow-up requests with the token's query string verbatim.
	/// Events are returned in arrival order; no client-side sort.
	pub async fn fetch_events(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Event>> {
		let type_filter = format!("type IN {}", AUDIT_EVENT_KINDS.join(","));
		let mut query = vec![("q", type_filter)];
		if let Some(since) = since {
			query.push(("q", format!("timestamp>{}", format_cursor(since))));
		}

		let mut events = Vec::new();
		let mut page: EventPage = match self
			.get_json(&format!("{}/v2/events", self.inner.base_url), &query)
			.await?
		{
			Some(page) => page,
			None => return Ok(events),
		};

		loop {
			events.extend(page.resources.into_iter().map(EventResource::into_event));

			let Some(next_url) = page.next_url else { break };

			// next_url embeds the full query for the following page.
			page = match self
				.get_json(&format!("{}{}", self.inner.base_url, next_url), &[])
				.await?
			{
				Some(page) => page,
				None => break,
			};
		}

		debug!(count = events.len(), "Fetched audit events");
		Ok(events)
	}

	/// The one-shot at-rest fetch used to seed the poll cursor.
	///
	/// Returns the largest timestamp among the events currently visible
	/// in the API, or `None` when no matching event exists.
	pub async fn latest_timestamp(&self) -> Result<Option<DateTime<Utc>>> {
		let events = self.fetch_events(None).await?;
		Ok(events.into_iter().map(|event| event.occurred_at).max())
	}

	/// Generic single-resource GET-and-decode used by enrichment hops.
	///
	/// A non-2xx response is absorbed: one `analytics error` record is
	/// emitted and `Ok(None)` is returned, so a broken platform link
	/// becomes observability data instead of stopping the pipeline.
	/// Transport failures propagate to the caller.
	pub async fn fetch<T: DeserializeOwned>(
		&self,
		path: &str,
		query: &[(&str, String)],
	) -> Result<Option<T>> {
		self.get_json(&format!("{}{}", self.inner.base_url, path), query)
			.await
	}

	async fn get_json<T: DeserializeOwned>(
		&self,
		url: &str,
		query: &[(&str, String)],
	) -> Result<Option<T>> {
		debug!(url = %url, "Fetching from platform API");

		let mut request = self.inner.http_client.get(url);
		if !query.is_empty() {
			request = request.query(query);
		}

		let response = request.send().await?;
		let status = response.status();
		let body = response.text().await?;

		if !status.is_success() {
			self.report_fetch_failure(status.as_u16(), &body).await;
			return Ok(None);
		}

		let value = serde_json::from_str(&body).map_err(|source| EventsError::Decode {
			url: url.to_string(),
			source,
		})?;
		Ok(Some(value))
	}

	async fn report_fetch_failure(&self, status: u16, body: &str) {
		warn!(status, "Platform API returned an error, reporting as telemetry");

		let environment = &self.inner.environment;
		let record = TelemetryRecord::new(
			environment.user_id.clone(),
			ANALYTICS_ERROR_EVENT,
			Utc::now(),
			environment
				.base_properties()
				.insert("message", format!("{status} {body}")),
		);

		if let Err(err) = self.inner.sink.emit(record).await {
			warn!(error = %err, "Failed to report fetch failure");
		}
	}
}

/// Formats a cursor timestamp as RFC3339 without fractional seconds,
/// the form the platform's timestamp filter expects.
fn format_cursor(ts: DateTime<Utc>) -> String {
	ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event::kinds;
	use async_trait::async_trait;
	use chrono::TimeZone;
	use serde_json::json;
	use std::sync::Mutex;
	use wiremock::matchers::{method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	#[derive(Default)]
	struct RecordingSink {
		records: Mutex<Vec<TelemetryRecord>>,
	}

	impl RecordingSink {
		fn records(&self) -> Vec<TelemetryRecord> {
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

	fn test_client(base_url: String, sink: Arc<RecordingSink>) -> EventSourceClient {
		EventSourceClient::builder()
			.base_url(base_url)
			.sink(sink)
			.environment(Environment::new("user-1234", "0.1.0", "6.8.0"))
			.build()
			.unwrap()
	}

	fn event_body(kind: &str, timestamp: &str, metadata: serde_json::Value) -> serde_json::Value {
		json!({"entity": {"type": kind, "timestamp": timestamp, "metadata": metadata}})
	}

	#[tokio::test]
	async fn test_fetch_events_sends_type_and_timestamp_filters() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/v2/events"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"next_url": null,
				"resources": []
			})))
			.expect(1)
			.mount(&server)
			.await;

		let sink = Arc::new(RecordingSink::default());
		let client = test_client(server.uri(), sink);
		let since = Utc.with_ymd_and_hms(2018, 8, 8, 8, 8, 8).unwrap();

		client.fetch_events(Some(since)).await.unwrap();

		let requests = server.received_requests().await.unwrap();
		let predicates: Vec<String> = requests[0]
			.url
			.query_pairs()
			.filter(|(k, _)| k == "q")
			.map(|(_, v)| v.into_owned())
			.collect();

		assert_eq!(predicates.len(), 2);
		assert!(predicates[0].starts_with("type IN audit.app.create,"));
		assert_eq!(predicates[1], "timestamp>2018-08-08T08:08:08Z");
	}

	#[tokio::test]
	async fn test_fetch_events_follows_pagination_in_order() {
		let server = MockServer::start().await;

		// Page two is matched by the query the next_url token carries.
		Mock::given(method("GET"))
			.and(path("/v2/events"))
			.and(query_param("page", "2"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"next_url": null,
				"resources": [event_body(kinds::SPACE_CREATE, "2018-08-09T08:08:10Z", json!({}))]
			})))
			.expect(1)
			.mount(&server)
			.await;

		Mock::given(method("GET"))
			.and(path("/v2/events"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"next_url": "/v2/events?page=2",
				"resources": [
					event_body(kinds::APP_CREATE, "2018-08-09T08:08:08Z", json!({})),
					event_body(kinds::ORG_CREATE, "2018-08-09T08:08:09Z", json!({}))
				]
			})))
			.expect(1)
			.mount(&server)
			.await;

		let sink = Arc::new(RecordingSink::default());
		let client = test_client(server.uri(), sink);

		let events = client.fetch_events(None).await.unwrap();

		assert_eq!(events.len(), 3);
		assert_eq!(events[0].kind, kinds::APP_CREATE);
		assert_eq!(events[1].kind, kinds::ORG_CREATE);
		assert_eq!(events[2].kind, kinds::SPACE_CREATE);
	}

	#[tokio::test]
	async fn test_fetch_absorbs_http_error_into_telemetry() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/v2/service_plans/plan-guid"))
			.respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
			.mount(&server)
			.await;

		let sink = Arc::new(RecordingSink::default());
		let client = test_client(server.uri(), Arc::clone(&sink));

		let result: Option<serde_json::Value> = client
			.fetch("/v2/service_plans/plan-guid", &[])
			.await
			.unwrap();

		assert!(result.is_none());

		let records = sink.records();
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].event_name, ANALYTICS_ERROR_EVENT);
		assert_eq!(records[0].user_id, "user-1234");
		assert_eq!(
			records[0].properties.get("message"),
			Some(&json!("500 upstream exploded"))
		);
		assert!(records[0].properties.get("os").is_some());
		assert!(records[0].properties.get("version").is_some());
	}

	#[tokio::test]
	async fn test_fetch_transport_failure_propagates() {
		let server = MockServer::start().await;
		let uri = server.uri();
		drop(server);

		let sink = Arc::new(RecordingSink::default());
		let client = test_client(uri, Arc::clone(&sink));

		let result = client.fetch::<serde_json::Value>("/v2/apps/guid", &[]).await;

		assert!(matches!(result, Err(EventsError::Request(_))));
		assert!(sink.records().is_empty());
	}

	#[tokio::test]
	async fn test_fetch_decodes_typed_destination() {
		#[derive(Debug, serde::Deserialize)]
		struct Plan {
			entity: PlanEntity,
		}
		#[derive(Debug, serde::Deserialize)]
		struct PlanEntity {
			service_url: String,
		}

		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/v2/service_plans/plan-guid"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"entity": {"service_url": "/v2/services/service-guid"}
			})))
			.mount(&server)
			.await;

		let sink = Arc::new(RecordingSink::default());
		let client = test_client(server.uri(), sink);

		let plan: Option<Plan> = client
			.fetch("/v2/service_plans/plan-guid", &[])
			.await
			.unwrap();

		assert_eq!(
			plan.unwrap().entity.service_url,
			"/v2/services/service-guid"
		);
	}

	#[tokio::test]
	async fn test_latest_timestamp_is_max_observed() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/v2/events"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"next_url": null,
				"resources": [
					event_body(kinds::APP_CREATE, "2018-08-09T08:08:08Z", json!({})),
					event_body(kinds::APP_CRASH, "2018-08-08T09:07:08Z", json!({}))
				]
			})))
			.mount(&server)
			.await;

		let sink = Arc::new(RecordingSink::default());
		let client = test_client(server.uri(), sink);

		let latest = client.latest_timestamp().await.unwrap();
		assert_eq!(
			latest,
			Some(Utc.with_ymd_and_hms(2018, 8, 9, 8, 8, 8).unwrap())
		);
	}

	#[tokio::test]
	async fn test_latest_timestamp_none_when_no_events() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/v2/events"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"next_url": null,
				"resources": []
			})))
			.mount(&server)
			.await;

		let sink = Arc::new(RecordingSink::default());
		let client = test_client(server.uri(), sink);

		assert_eq!(client.latest_timestamp().await.unwrap(), None);
	}
}
