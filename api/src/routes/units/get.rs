//! Unit and roster read surface consumed by the attendance screens.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use util::state::AppState;

use crate::response::{ApiResponse, ApiResult};

use db::models::member::{Model as Member, RosterScope};
use db::models::unit::Model as Unit;

#[derive(Debug, Serialize)]
pub struct UnitResponse {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
}

impl From<Unit> for UnitResponse {
    fn from(u: Unit) -> Self {
        Self {
            id: u.id,
            name: u.name,
            color: u.color,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub full_name: String,
    pub unit_id: Option<i64>,
    pub class_id: Option<i64>,
    pub staff: bool,
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            unit_id: m.unit_id,
            class_id: m.class_id,
            staff: m.staff,
        }
    }
}

/// GET /api/units
///
/// All units, ordered by name. Any authenticated role.
pub async fn list_units(State(state): State<AppState>) -> ApiResult<Vec<UnitResponse>> {
    let db = state.db();

    match Unit::all_ordered(db).await {
        Ok(units) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success(
                units.into_iter().map(UnitResponse::from).collect(),
                "Units retrieved",
            )),
        )),
        Err(_) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Database error retrieving units")),
        )),
    }
}

/// GET /api/units/{unit_id}/members
///
/// Active members of a unit, ordered by name. Any authenticated role.
pub async fn list_unit_members(
    State(state): State<AppState>,
    Path(unit_id): Path<i64>,
) -> ApiResult<Vec<MemberResponse>> {
    let db = state.db();

    match Unit::get(db, unit_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Unit not found")),
            ));
        }
        Err(_) => {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error while checking unit")),
            ));
        }
    }

    match Member::list_active(db, RosterScope::Unit(unit_id)).await {
        Ok(members) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success(
                members.into_iter().map(MemberResponse::from).collect(),
                "Unit members retrieved",
            )),
        )),
        Err(_) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Database error retrieving members")),
        )),
    }
}
