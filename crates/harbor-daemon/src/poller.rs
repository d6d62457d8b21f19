// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The fetch→dispatch→advance-cursor poll loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use harbor_analytics::{Environment, TelemetrySink};
use harbor_events::EventSourceClient;

use crate::dispatch::{dispatch, EventKind};
use crate::error::PollerError;
use crate::handlers::HandlerContext;
use crate::whitelist::Whitelists;

/// Default spacing between poll ticks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Owns the cursor and runs the periodic fetch→dispatch loop.
///
/// Single logical task: events within a page, and pages across ticks,
/// are processed strictly sequentially in arrival order. Once `run`
/// returns the instance is spent; restarting means constructing a new
/// poller, which re-derives its cursor from the latest known event.
pub struct Poller {
	client: EventSourceClient,
	sink: Arc<dyn TelemetrySink>,
	environment: Environment,
	whitelists: Whitelists,
	interval: Duration,
	cursor: Option<DateTime<Utc>>,
}

impl Poller {
	pub fn new(
		client: EventSourceClient,
		sink: Arc<dyn TelemetrySink>,
		environment: Environment,
		whitelists: Whitelists,
		interval: Duration,
	) -> Self {
		Self {
			client,
			sink,
			environment,
			whitelists,
			interval,
			cursor: None,
		}
	}

	/// The latest event timestamp observed so far, if any.
	pub fn cursor(&self) -> Option<DateTime<Utc>> {
		self.cursor
	}

	/// Seeds the cursor, then polls until the token is cancelled.
	///
	/// The seed is a one-shot at-rest fetch of the latest timestamp
	/// currently in the API, so pre-existing history is never re-emitted
	/// as telemetry on first boot. Cancellation is cooperative: an
	/// in-flight fetch/dispatch step finishes naturally and the token is
	/// observed before the next tick.
	pub async fn run(&mut self, shutdown: CancellationToken) -> Result<(), PollerError> {
		self.cursor = self.client.latest_timestamp().await?;
		info!(
			cursor = ?self.cursor,
			interval_secs = self.interval.as_secs(),
			"Poller started"
		);

		let mut ticker = tokio::time::interval(self.interval);
		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
		// The first tick of a tokio interval fires immediately; consume
		// it so the loop waits one full interval after the seed.
		ticker.tick().await;

		loop {
			tokio::select! {
				_ = shutdown.cancelled() => break,
				_ = ticker.tick() => self.poll_once().await,
			}
		}

		info!(cursor = ?self.cursor, "Poller stopped");
		Ok(())
	}

	/// One tick: fetch everything newer than the cursor and dispatch it.
	///
	/// A transport failure in the listing fetch aborts the whole tick
	/// and is retried on the next one. A failing handler aborts only its
	/// own event; the cursor has already advanced for that event and is
	/// never rolled back, so the event is not reprocessed.
	pub async fn poll_once(&mut self) {
		let events = match self.client.fetch_events(self.cursor).await {
			Ok(events) => events,
			Err(err) => {
				warn!(error = %err, "Event fetch failed, retrying on next tick");
				return;
			}
		};

		for event in events {
			let current = self.cursor.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
			if event.occurred_at > current {
				self.cursor = Some(event.occurred_at);
			}

			let Some(kind) = EventKind::parse(&event.kind) else {
				debug!(kind = %event.kind, "Skipping unrecognized event kind");
				continue;
			};

			let ctx = HandlerContext {
				client: &self.client,
				sink: &self.sink,
				cursor: self.cursor.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
				environment: &self.environment,
				whitelists: &self.whitelists,
			};

			if let Err(err) = dispatch(kind, &event.payload, &ctx).await {
				error!(kind = %event.kind, error = %err, "Event handler failed");
			}
		}
	}
}
