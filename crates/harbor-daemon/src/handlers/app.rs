// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Handlers for application lifecycle events.

use serde::Deserialize;

use harbor_analytics::Properties;

use crate::error::DispatchError;
use crate::handlers::{decode_payload, names, HandlerContext};

#[derive(Debug, Default, Deserialize)]
struct AppCreatePayload {
	#[serde(default)]
	request: AppCreateRequest,
}

#[derive(Debug, Default, Deserialize)]
struct AppCreateRequest {
	#[serde(default)]
	buildpack: String,
}

/// Classifies the requested buildpack through the whitelist and emits
/// one `app created` record carrying the label.
pub async fn app_created(
	ctx: &HandlerContext<'_>,
	payload: &serde_json::Value,
) -> Result<(), DispatchError> {
	let decoded: AppCreatePayload = decode_payload(payload);
	let buildpack = ctx
		.whitelists
		.buildpacks
		.classify(&decoded.request.buildpack)
		.to_string();

	ctx.emit(
		names::APP_CREATED,
		Properties::new().insert("buildpack", buildpack),
	)
	.await
}

/// Emits one `app crashed` record.
pub async fn app_crashed(
	ctx: &HandlerContext<'_>,
	_payload: &serde_json::Value,
) -> Result<(), DispatchError> {
	ctx.emit(names::APP_CRASHED, Properties::new()).await
}

/// Emits one `app restaged` record.
pub async fn app_restaged(
	ctx: &HandlerContext<'_>,
	_payload: &serde_json::Value,
) -> Result<(), DispatchError> {
	ctx.emit(names::APP_RESTAGED, Properties::new()).await
}
