use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use util::state::AppState;

use crate::response::{ApiResponse, ApiResult};
use crate::services::summary::{
    LeadershipAttendanceSummary, UnitAttendanceSummary, leadership_summary, unit_summaries,
};

use db::models::encounter::Model as Encounter;

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub units: Vec<UnitAttendanceSummary>,
    pub leadership: LeadershipAttendanceSummary,
}

/// GET /api/encounters/{encounter_id}/summary
///
/// Per-unit and leadership attendance summaries for the dashboard. Any
/// authenticated role; read-only.
pub async fn get_summary(
    State(state): State<AppState>,
    Path(encounter_id): Path<i64>,
) -> ApiResult<SummaryResponse> {
    let db = state.db();

    if Encounter::get(db, encounter_id)
        .await
        .ok()
        .flatten()
        .is_none()
    {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Encounter not found")),
        ));
    }

    let units = unit_summaries(db, encounter_id).await.map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Database error computing unit summaries")),
        )
    })?;

    let leadership = leadership_summary(db, encounter_id).await.map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(
                "Database error computing leadership summary",
            )),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            SummaryResponse { units, leadership },
            "Attendance summary computed",
        )),
    ))
}
