//! Attendance roster view and batch save for one encounter.
//!
//! The save path mirrors the form controller's editability matrix before
//! anything reaches the presence store: per item, every field the acting
//! role may not edit is overwritten with the stored (or sentinel) value, so a
//! forged client cannot smuggle a field through. The store itself stays
//! state-agnostic; this handler is where the in_progress window is enforced.

use std::collections::HashSet;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, ApiResult, Empty};
use crate::services::attendance_form::FieldAccess;

use super::common::EncounterResponse;
use db::models::encounter::Model as Encounter;
use db::models::member::{Model as Member, RosterScope};
use db::models::presence::{Model as Presence, PresenceItem, RosterEntry, Status as PresenceStatus};
use db::models::unit_counselor::Model as UnitCounselor;
use db::models::user::Role;

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub unit_id: Option<i64>,
    pub leadership: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceViewResponse {
    pub encounter: EncounterResponse,
    /// What the acting role may edit right now; mirrored by the form.
    pub editable: FieldAccess,
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Serialize, Default)]
pub struct SaveAttendanceResponse {
    pub saved: usize,
}

#[derive(Debug, Deserialize)]
pub struct SaveAttendanceReq {
    pub items: Vec<PresenceItem>,
}

/// GET /api/encounters/{encounter_id}/attendance
///
/// The merged roster view: one entry per active member of the selected
/// population, with sentinel defaults for members not yet saved.
///
/// **Query**: exactly one of `unit_id` or `leadership=true`. Counselors are
/// always scoped to their linked unit and may omit the selector.
pub async fn get_attendance(
    State(state): State<AppState>,
    Path(encounter_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(q): Query<AttendanceQuery>,
) -> ApiResult<AttendanceViewResponse> {
    let db = state.db();

    let Some(encounter) = Encounter::get(db, encounter_id).await.ok().flatten() else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Encounter not found")),
        ));
    };

    let scope = resolve_scope(&state, &claims, q.unit_id, q.leadership).await?;

    if let RosterScope::Unit(unit_id) = scope {
        let unit_exists = db::models::unit::Model::get(db, unit_id)
            .await
            .ok()
            .flatten()
            .is_some();
        if !unit_exists {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Unit not found")),
            ));
        }
    }

    let entries = Presence::roster_view(db, encounter_id, scope)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error building roster view")),
            )
        })?;

    let editable = FieldAccess::for_role(claims.role, encounter.status);
    let message = if entries.is_empty() {
        "No active members in this roster"
    } else {
        "Attendance roster retrieved"
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            AttendanceViewResponse {
                encounter: encounter.into(),
                editable,
                entries,
            },
            message,
        )),
    ))
}

/// PUT /api/encounters/{encounter_id}/attendance
///
/// Saves a batch of presence records. **Auth**: admin or counselor.
///
/// Items are applied in submission order through the store's upsert, so
/// resubmitting the same batch is idempotent. Fields outside the actor's
/// matrix are echoed from the stored row; counselors may only touch members
/// of their own unit.
pub async fn save_attendance(
    State(state): State<AppState>,
    Path(encounter_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<SaveAttendanceReq>,
) -> ApiResult<SaveAttendanceResponse> {
    let db = state.db();

    let Some(encounter) = Encounter::get(db, encounter_id).await.ok().flatten() else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Encounter not found")),
        ));
    };

    let access = FieldAccess::for_role(claims.role, encounter.status);
    if !access.any() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(
                "Attendance can only be recorded while the encounter is in progress",
            )),
        ));
    }

    // Which members this actor may write at all.
    let allowed: HashSet<i64> = match claims.role {
        Role::Counselor => {
            let Some(link) = counselor_unit(&state, claims.sub).await? else {
                return Err((
                    StatusCode::FORBIDDEN,
                    Json(ApiResponse::error("Counselor is not linked to a unit")),
                ));
            };
            Member::list_active(db, RosterScope::Unit(link.unit_id))
                .await
                .map_err(member_lookup_error)?
                .into_iter()
                .map(|m| m.id)
                .collect()
        }
        _ => {
            let ids: Vec<i64> = body.items.iter().map(|i| i.member_id).collect();
            active_member_ids(&state, &ids).await?
        }
    };

    for item in &body.items {
        if !allowed.contains(&item.member_id) {
            let msg = if claims.role == Role::Counselor {
                "Counselors may only record attendance for their own unit"
            } else {
                "Batch references an unknown or inactive member"
            };
            return Err((
                status_for_rejection(claims.role),
                Json(ApiResponse::error(msg)),
            ));
        }
    }

    // Re-read each stored row and keep locked fields at their stored values
    // before handing the batch to the store.
    let mut effective = Vec::with_capacity(body.items.len());
    for item in &body.items {
        let stored = Presence::find_by_natural_key(db, encounter_id, item.member_id)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Database error reading presence rows")),
                )
            })?
            .map(|row| PresenceItem {
                member_id: row.member_id,
                status: row.status,
                has_material: row.has_material,
                has_uniform: row.has_uniform,
                note: row.note,
            })
            .unwrap_or(PresenceItem {
                member_id: item.member_id,
                status: PresenceStatus::default(),
                has_material: false,
                has_uniform: false,
                note: None,
            });

        effective.push(access.merge(item, &stored));
    }

    match Presence::upsert_batch(db, encounter_id, &effective, claims.sub).await {
        Ok(saved) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success(
                SaveAttendanceResponse { saved },
                "Attendance saved",
            )),
        )),
        // Surface the store's message verbatim so the UI can show it.
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

fn status_for_rejection(role: Role) -> StatusCode {
    if role == Role::Counselor {
        StatusCode::FORBIDDEN
    } else {
        StatusCode::BAD_REQUEST
    }
}

async fn resolve_scope(
    state: &AppState,
    claims: &crate::auth::Claims,
    unit_id: Option<i64>,
    leadership: Option<bool>,
) -> Result<RosterScope, (StatusCode, Json<ApiResponse<Empty>>)> {
    if claims.role == Role::Counselor {
        let Some(link) = counselor_unit(state, claims.sub).await? else {
            return Err((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("Counselor is not linked to a unit")),
            ));
        };
        if leadership == Some(true) || unit_id.is_some_and(|u| u != link.unit_id) {
            return Err((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error(
                    "Counselors may only view their own unit's roster",
                )),
            ));
        }
        return Ok(RosterScope::Unit(link.unit_id));
    }

    match (unit_id, leadership.unwrap_or(false)) {
        (Some(u), false) => Ok(RosterScope::Unit(u)),
        (None, true) => Ok(RosterScope::Leadership),
        _ => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "Provide exactly one of unit_id or leadership=true",
            )),
        )),
    }
}

async fn counselor_unit(
    state: &AppState,
    user_id: i64,
) -> Result<Option<db::models::unit_counselor::CounselorUnit>, (StatusCode, Json<ApiResponse<Empty>>)>
{
    UnitCounselor::unit_for_counselor(state.db(), user_id)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "Database error while resolving counselor unit",
                )),
            )
        })
}

async fn active_member_ids(
    state: &AppState,
    ids: &[i64],
) -> Result<HashSet<i64>, (StatusCode, Json<ApiResponse<Empty>>)> {
    use db::models::member::{Column, Entity};
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

    if ids.is_empty() {
        return Ok(HashSet::new());
    }

    Entity::find()
        .filter(Column::Id.is_in(ids.to_vec()))
        .filter(Column::Active.eq(true))
        .all(state.db())
        .await
        .map(|rows| rows.into_iter().map(|m| m.id).collect())
        .map_err(member_lookup_error)
}

fn member_lookup_error(e: sea_orm::DbErr) -> (StatusCode, Json<ApiResponse<Empty>>) {
    tracing::error!(error = %e, "Member lookup failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error("Database error while checking members")),
    )
}
