//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via the appropriate access
//! control middleware:
//! - `/health` → liveness check (public)
//! - `/auth` → login and current-actor endpoints
//! - `/units` → unit and roster read surface (authenticated users)
//! - `/encounters` → encounter lifecycle, attendance, and summaries

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    auth::auth_routes, encounters::encounter_routes, health::health_routes, units::unit_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod auth;
pub mod encounters;
pub mod health;
pub mod units;

/// Builds the complete application router for all HTTP endpoints.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/units", unit_routes().route_layer(from_fn(allow_authenticated)))
        .nest(
            "/encounters",
            encounter_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
