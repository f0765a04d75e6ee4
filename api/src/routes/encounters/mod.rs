use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

mod attendance;
mod common;
mod delete;
mod get;
mod post;
mod put;
mod summary;

pub use attendance::{get_attendance, save_attendance};
pub use delete::delete_encounter;
pub use get::{get_encounter, list_encounters};
pub use post::{create_encounter, finish_encounter, start_encounter};
pub use put::edit_encounter;
pub use summary::get_summary;

use crate::auth::guards::{allow_admin, allow_attendance_writer, allow_secretariat};

pub fn encounter_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_encounters))
        .route("/", post(create_encounter).route_layer(from_fn(allow_secretariat)))
        .route("/{encounter_id}", get(get_encounter))
        .route(
            "/{encounter_id}",
            put(edit_encounter).route_layer(from_fn(allow_secretariat)),
        )
        .route(
            "/{encounter_id}",
            delete(delete_encounter).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{encounter_id}/start",
            post(start_encounter).route_layer(from_fn(allow_secretariat)),
        )
        .route(
            "/{encounter_id}/finish",
            post(finish_encounter).route_layer(from_fn(allow_secretariat)),
        )
        .route("/{encounter_id}/attendance", get(get_attendance))
        .route(
            "/{encounter_id}/attendance",
            put(save_attendance).route_layer(from_fn(allow_attendance_writer)),
        )
        .route("/{encounter_id}/summary", get(get_summary))
}
