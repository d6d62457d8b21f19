// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Resolution of event-kind strings to handlers.
//!
//! The set of handled kinds is closed: a sum type plus exhaustive
//! matching, so adding a kind without wiring its handler fails to
//! compile. The platform emits many audit kinds beyond these; the poll
//! loop silently skips anything [`EventKind::parse`] does not recognize.

use crate::error::DispatchError;
use crate::handlers::{self, HandlerContext};

use harbor_events::kinds;

/// The audit-event kinds the pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	AppCreate,
	AppCrash,
	AppRestage,
	OrgCreate,
	SpaceCreate,
	RouteCreate,
	ServiceInstanceCreate,
	ServiceBindingCreate,
	UserProvidedServiceCreate,
	ServiceBrokerCreate,
}

impl EventKind {
	/// Maps a platform audit type string to a kind.
	///
	/// Unrecognized strings yield `None`; that is not an error.
	pub fn parse(kind: &str) -> Option<Self> {
		match kind {
			kinds::APP_CREATE => Some(Self::AppCreate),
			kinds::APP_CRASH => Some(Self::AppCrash),
			kinds::APP_RESTAGE => Some(Self::AppRestage),
			kinds::ORG_CREATE => Some(Self::OrgCreate),
			kinds::SPACE_CREATE => Some(Self::SpaceCreate),
			kinds::ROUTE_CREATE => Some(Self::RouteCreate),
			kinds::SERVICE_INSTANCE_CREATE => Some(Self::ServiceInstanceCreate),
			kinds::SERVICE_BINDING_CREATE => Some(Self::ServiceBindingCreate),
			kinds::USER_PROVIDED_SERVICE_CREATE => Some(Self::UserProvidedServiceCreate),
			kinds::SERVICE_BROKER_CREATE => Some(Self::ServiceBrokerCreate),
			_ => None,
		}
	}
}

/// Invokes the handler for `kind` against one event payload.
pub async fn dispatch(
	kind: EventKind,
	payload: &serde_json::Value,
	ctx: &HandlerContext<'_>,
) -> Result<(), DispatchError> {
	match kind {
		EventKind::AppCreate => handlers::app::app_created(ctx, payload).await,
		EventKind::AppCrash => handlers::app::app_crashed(ctx, payload).await,
		EventKind::AppRestage => handlers::app::app_restaged(ctx, payload).await,
		EventKind::OrgCreate => handlers::simple::org_created(ctx, payload).await,
		EventKind::SpaceCreate => handlers::simple::space_created(ctx, payload).await,
		EventKind::RouteCreate => handlers::simple::route_created(ctx, payload).await,
		EventKind::ServiceInstanceCreate => handlers::service::service_created(ctx, payload).await,
		EventKind::ServiceBindingCreate => handlers::service::service_bound(ctx, payload).await,
		EventKind::UserProvidedServiceCreate => {
			handlers::service::user_provided_service_created(ctx, payload).await
		}
		EventKind::ServiceBrokerCreate => {
			handlers::service::service_broker_created(ctx, payload).await
		}
	}
}
