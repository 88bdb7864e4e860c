//! Axum routing for the persona REST resource.
//!
//! Routes orchestrate but don't contain business logic: handlers delegate
//! to `domain::service::Service` and speak `dto::*` on the wire.

use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use super::handlers;
use crate::domain::service::Service;

pub const PERSONAS_PATH: &str = "/api/personas";
pub const PERSONA_PATH: &str = "/api/personas/{id}";

/// Mount the persona endpoints on `router` and attach the service.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(
            PERSONAS_PATH,
            get(handlers::list_personas).post(handlers::create_persona),
        )
        .route(
            PERSONA_PATH,
            get(handlers::get_persona)
                .put(handlers::update_persona)
                .delete(handlers::delete_persona),
        )
        .layer(Extension(service))
}
