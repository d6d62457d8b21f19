// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Binary entry point for the Harbor telemetry daemon.

use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use harbor_daemon::{Args, Poller, Whitelists};
use harbor_events::EventSourceClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let args = Args::parse();
	let environment = args.environment();
	let sink = args.sink()?;

	let client = EventSourceClient::builder()
		.base_url(args.api_url.as_str())
		.timeout(args.request_timeout())
		.sink(Arc::clone(&sink))
		.environment(environment.clone())
		.build()?;

	let mut poller = Poller::new(
		client,
		sink,
		environment,
		Whitelists::default(),
		args.poll_interval(),
	);

	let shutdown = CancellationToken::new();
	let signal_token = shutdown.clone();
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			info!("Received interrupt, stopping after the current step");
			signal_token.cancel();
		}
	});

	poller.run(shutdown).await?;
	Ok(())
}
