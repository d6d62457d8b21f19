// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Handlers for service lifecycle events.
//!
//! The service-instance and service-binding handlers resolve a
//! human-readable service label through two platform lookups before
//! emitting. A label outside the service whitelist suppresses the
//! emission entirely: whitelisting is a privacy filter, not an error.

use serde::Deserialize;
use tracing::debug;

use harbor_analytics::Properties;

use crate::error::DispatchError;
use crate::handlers::{decode_payload, names, HandlerContext};

#[derive(Debug, Default, Deserialize)]
struct ServiceCreatePayload {
	#[serde(default)]
	request: ServiceCreateRequest,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceCreateRequest {
	#[serde(default)]
	service_plan_guid: String,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceBindPayload {
	#[serde(default)]
	request: ServiceBindRequest,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceBindRequest {
	#[serde(default)]
	service_instance_guid: String,
}

/// A resource whose entity points at its service definition.
#[derive(Debug, Deserialize)]
struct ServiceUrlResource {
	entity: ServiceUrlEntity,
}

#[derive(Debug, Deserialize)]
struct ServiceUrlEntity {
	#[serde(default)]
	service_url: String,
}

#[derive(Debug, Deserialize)]
struct ServiceResource {
	entity: ServiceEntity,
}

#[derive(Debug, Deserialize)]
struct ServiceEntity {
	#[serde(default)]
	label: String,
}

/// Resolves the created instance's service label via its plan, then
/// emits one `service created` record when the label is whitelisted.
pub async fn service_created(
	ctx: &HandlerContext<'_>,
	payload: &serde_json::Value,
) -> Result<(), DispatchError> {
	let decoded: ServiceCreatePayload = decode_payload(payload);
	let path = format!("/v2/service_plans/{}", decoded.request.service_plan_guid);
	emit_whitelisted_service(ctx, names::SERVICE_CREATED, &path).await
}

/// Resolves the bound instance's service label, then emits one
/// `service bound` record when the label is whitelisted.
pub async fn service_bound(
	ctx: &HandlerContext<'_>,
	payload: &serde_json::Value,
) -> Result<(), DispatchError> {
	let decoded: ServiceBindPayload = decode_payload(payload);
	let path = format!(
		"/v2/service_instances/{}",
		decoded.request.service_instance_guid
	);
	emit_whitelisted_service(ctx, names::SERVICE_BOUND, &path).await
}

/// Emits one `user provided service created` record.
pub async fn user_provided_service_created(
	ctx: &HandlerContext<'_>,
	_payload: &serde_json::Value,
) -> Result<(), DispatchError> {
	ctx.emit(names::USER_PROVIDED_SERVICE_CREATED, Properties::new())
		.await
}

/// Emits one `service broker created` record.
pub async fn service_broker_created(
	ctx: &HandlerContext<'_>,
	_payload: &serde_json::Value,
) -> Result<(), DispatchError> {
	ctx.emit(names::SERVICE_BROKER_CREATED, Properties::new())
		.await
}

/// The shared two-hop protocol: fetch the resource at `first_hop_path`,
/// follow its `service_url`, check the resolved label against the
/// whitelist, emit carrying the label.
///
/// An absorbed HTTP failure at either hop ends the protocol with no
/// emission; the client already reported it as an `analytics error`.
async fn emit_whitelisted_service(
	ctx: &HandlerContext<'_>,
	event_name: &str,
	first_hop_path: &str,
) -> Result<(), DispatchError> {
	let Some(resource) = ctx
		.client
		.fetch::<ServiceUrlResource>(first_hop_path, &[])
		.await?
	else {
		return Ok(());
	};

	let Some(service) = ctx
		.client
		.fetch::<ServiceResource>(&resource.entity.service_url, &[])
		.await?
	else {
		return Ok(());
	};

	let label = service.entity.label;
	if !ctx.whitelists.services.is_whitelisted(&label) {
		debug!(service = %label, "Service not whitelisted, suppressing telemetry");
		return Ok(());
	}

	ctx.emit(event_name, Properties::new().insert("service", label))
		.await
}
