use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Serialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, ApiResult};

use super::common::UserResponse;
use db::models::unit_counselor::{CounselorUnit, Model as UnitCounselor};
use db::models::user::{Entity as UserEntity, Role};
use sea_orm::EntityTrait;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Present only for counselors with a unit linkage.
    pub unit: Option<CounselorUnit>,
}

/// GET /api/auth/me
///
/// Resolves the current actor: identity, role, and (for counselors) the unit
/// they are responsible for.
pub async fn me(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> ApiResult<MeResponse> {
    let db = state.db();

    let user = match UserEntity::find_by_id(claims.sub).one(db).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Account no longer exists")),
            ));
        }
        Err(_) => {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error while resolving account")),
            ));
        }
    };

    let unit = if user.role == Role::Counselor {
        UnitCounselor::unit_for_counselor(db, user.id)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error(
                        "Database error while resolving counselor unit",
                    )),
                )
            })?
    } else {
        None
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            MeResponse {
                user: user.into(),
                unit,
            },
            "Current actor resolved",
        )),
    ))
}
