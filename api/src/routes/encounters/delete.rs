use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use crate::response::{ApiResponse, ApiResult, Empty};

use db::error::EncounterError;
use db::models::encounter::Model as Encounter;

/// DELETE /api/encounters/{encounter_id}
///
/// **Auth**: admin only. An encounter with attendance records is never
/// physically deleted (409).
pub async fn delete_encounter(
    State(state): State<AppState>,
    Path(encounter_id): Path<i64>,
) -> ApiResult<Empty> {
    let db = state.db();

    match Encounter::delete(db, encounter_id).await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Encounter deleted")),
        )),
        Err(EncounterError::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Encounter not found")),
        )),
        Err(e @ EncounterError::HasPresence) => {
            Err((StatusCode::CONFLICT, Json(ApiResponse::error(e.to_string()))))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete encounter");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to delete encounter")),
            ))
        }
    }
}
