use axum::{Json, extract::State, http::StatusCode};
use util::state::AppState;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::{ApiResponse, ApiResult};

use super::common::{LoginRequest, LoginResponse};
use db::models::user::Model as User;

/// POST /api/auth/login
///
/// Verifies a username/password pair and issues a JWT carrying the user's
/// role. Wrong username and wrong password are indistinguishable to the
/// caller.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    if let Err(e) = body.validate() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(e.to_string())),
        ));
    }

    let db = state.db();

    match User::verify_credentials(db, &body.username, &body.password).await {
        Ok(Some(user)) => {
            let (token, expires_at) = generate_jwt(user.id, user.role);
            Ok((
                StatusCode::OK,
                Json(ApiResponse::success(
                    LoginResponse {
                        token,
                        expires_at,
                        user: user.into(),
                    },
                    "Login successful",
                )),
            ))
        }
        Ok(None) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid username or password")),
        )),
        Err(e) => {
            tracing::error!(error = %e, "Login failed against the database");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error during login")),
            ))
        }
    }
}
