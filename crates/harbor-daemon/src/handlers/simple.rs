// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Handlers that emit directly from the event, with no payload fields
//! and no enrichment lookups.

use harbor_analytics::Properties;

use crate::error::DispatchError;
use crate::handlers::{names, HandlerContext};

pub async fn org_created(
	ctx: &HandlerContext<'_>,
	_payload: &serde_json::Value,
) -> Result<(), DispatchError> {
	ctx.emit(names::ORG_CREATED, Properties::new()).await
}

pub async fn space_created(
	ctx: &HandlerContext<'_>,
	_payload: &serde_json::Value,
) -> Result<(), DispatchError> {
	ctx.emit(names::SPACE_CREATED, Properties::new()).await
}

pub async fn route_created(
	ctx: &HandlerContext<'_>,
	_payload: &serde_json::Value,
) -> Result<(), DispatchError> {
	ctx.emit(names::ROUTE_CREATED, Properties::new()).await
}
