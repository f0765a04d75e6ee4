use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use util::state::AppState;

use crate::response::{ApiResponse, ApiResult};

use super::common::{EncounterResponse, ListQuery, ListResponse};
use db::models::encounter::{ListFilter, Model as Encounter};

/// GET /api/encounters
///
/// Lists encounters newest first.
///
/// **Query**:
/// - `status` *(optional)*: `scheduled` | `in_progress` | `finalized`
/// - `from` / `to` *(optional)*: inclusive event-date bounds
/// - `page` *(default 1)*, `per_page` *(default 20, max 100)*
pub async fn list_encounters(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> ApiResult<ListResponse> {
    let db = state.db();
    let page = q.page.unwrap_or(1).max(1) as u64;
    let per_page = q.per_page.unwrap_or(20).clamp(1, 100) as u64;

    let filter = ListFilter {
        status: q.status,
        from: q.from,
        to: q.to,
    };

    match Encounter::list(db, filter, page, per_page).await {
        Ok((rows, total)) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success(
                ListResponse {
                    encounters: rows.into_iter().map(EncounterResponse::from).collect(),
                    page: page as i32,
                    per_page: per_page as i32,
                    total: total as i32,
                },
                "Encounters retrieved",
            )),
        )),
        Err(_) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Database error retrieving encounters")),
        )),
    }
}

/// GET /api/encounters/{encounter_id}
pub async fn get_encounter(
    State(state): State<AppState>,
    Path(encounter_id): Path<i64>,
) -> ApiResult<EncounterResponse> {
    let db = state.db();

    match Encounter::get(db, encounter_id).await {
        Ok(Some(row)) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success(row.into(), "Encounter retrieved")),
        )),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Encounter not found")),
        )),
        Err(_) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Database error retrieving encounter")),
        )),
    }
}
