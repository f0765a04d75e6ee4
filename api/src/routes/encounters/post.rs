use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, ApiResult};

use super::common::{CreateEncounterReq, EncounterResponse};
use db::error::EncounterError;
use db::models::encounter::Model as Encounter;

/// POST /api/encounters
///
/// **Auth**: admin or secretariat. Fails with 409 when another encounter
/// already occupies the date.
pub async fn create_encounter(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<CreateEncounterReq>,
) -> ApiResult<EncounterResponse> {
    if let Err(e) = body.validate() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(e.to_string())),
        ));
    }

    let db = state.db();

    match Encounter::create(db, body.event_date, body.description.as_deref(), claims.sub).await {
        Ok(row) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(row.into(), "Encounter created")),
        )),
        Err(e @ EncounterError::DuplicateDate(_)) => {
            Err((StatusCode::CONFLICT, Json(ApiResponse::error(e.to_string()))))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create encounter");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to create encounter")),
            ))
        }
    }
}

/// POST /api/encounters/{encounter_id}/start
///
/// Opens roll call. The transition is a conditional update: it succeeds only
/// while the encounter is still `scheduled`, so two concurrent starts cannot
/// both win.
pub async fn start_encounter(
    State(state): State<AppState>,
    Path(encounter_id): Path<i64>,
) -> ApiResult<EncounterResponse> {
    let db = state.db();

    if Encounter::get(db, encounter_id)
        .await
        .map_err(db_error)?
        .is_none()
    {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Encounter not found")),
        ));
    }

    match Encounter::start(db, encounter_id).await {
        Ok(true) => {
            let row = Encounter::get(db, encounter_id)
                .await
                .map_err(db_error)?
                .ok_or_else(not_found)?;
            Ok((
                StatusCode::OK,
                Json(ApiResponse::success(row.into(), "Roll call opened")),
            ))
        }
        Ok(false) => Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(
                "Encounter can only be started while scheduled",
            )),
        )),
        Err(e) => Err(db_error(e)),
    }
}

/// POST /api/encounters/{encounter_id}/finish
///
/// Closes roll call: only an `in_progress` encounter can be finalized.
pub async fn finish_encounter(
    State(state): State<AppState>,
    Path(encounter_id): Path<i64>,
) -> ApiResult<EncounterResponse> {
    let db = state.db();

    if Encounter::get(db, encounter_id)
        .await
        .map_err(db_error)?
        .is_none()
    {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Encounter not found")),
        ));
    }

    match Encounter::finish(db, encounter_id).await {
        Ok(true) => {
            let row = Encounter::get(db, encounter_id)
                .await
                .map_err(db_error)?
                .ok_or_else(not_found)?;
            Ok((
                StatusCode::OK,
                Json(ApiResponse::success(row.into(), "Encounter finalized")),
            ))
        }
        Ok(false) => Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(
                "Encounter can only be finalized while in progress",
            )),
        )),
        Err(e) => Err(db_error(e)),
    }
}

fn db_error(e: sea_orm::DbErr) -> (StatusCode, Json<ApiResponse<crate::response::Empty>>) {
    tracing::error!(error = %e, "Encounter transition failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error("Database error")),
    )
}

fn not_found() -> (StatusCode, Json<ApiResponse<crate::response::Empty>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Encounter not found")),
    )
}
