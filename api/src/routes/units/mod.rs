use axum::{Router, routing::get};
use util::state::AppState;

mod get;

pub use get::{list_unit_members, list_units};

pub fn unit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_units))
        .route("/{unit_id}/members", get(list_unit_members))
}
