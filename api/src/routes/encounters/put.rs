use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;
use validator::Validate;

use crate::response::{ApiResponse, ApiResult};

use super::common::{EditEncounterReq, EncounterResponse};
use db::error::EncounterError;
use db::models::encounter::Model as Encounter;

/// PUT /api/encounters/{encounter_id}
///
/// Edits date and/or description. **Auth**: admin or secretariat.
///
/// Finalized encounters are immutable (409); a date change onto an occupied
/// date is refused (409).
pub async fn edit_encounter(
    State(state): State<AppState>,
    Path(encounter_id): Path<i64>,
    Json(body): Json<EditEncounterReq>,
) -> ApiResult<EncounterResponse> {
    if let Err(e) = body.validate() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(e.to_string())),
        ));
    }

    let db = state.db();

    match Encounter::update_details(
        db,
        encounter_id,
        body.event_date,
        body.description.as_deref(),
    )
    .await
    {
        Ok(row) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success(row.into(), "Encounter updated")),
        )),
        Err(EncounterError::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Encounter not found")),
        )),
        Err(e @ (EncounterError::DuplicateDate(_) | EncounterError::Finalized)) => {
            Err((StatusCode::CONFLICT, Json(ApiResponse::error(e.to_string()))))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update encounter");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to update encounter")),
            ))
        }
    }
}
