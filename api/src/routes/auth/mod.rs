use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

mod common;
mod get;
mod post;

pub use common::UserResponse;
pub use get::me;
pub use post::login;

use crate::auth::guards::allow_authenticated;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(me).route_layer(from_fn(allow_authenticated)))
}
