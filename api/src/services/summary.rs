//! Attendance summary aggregation for dashboards.
//!
//! Pure computation over a roster + presence snapshot; reads the two stores,
//! never writes them. Given the same snapshot the output is identical.

use std::collections::HashMap;

use db::models::{member, presence, unit};
use sea_orm::{ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;

/// Attendance numbers for one population at one encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceTally {
    pub total_members: i64,
    /// on_time + late.
    pub present: i64,
    pub absent: i64,
    /// Integer percentage of present members, rounded half up; 0 for an
    /// empty population.
    pub percentage: i32,
    /// True iff at least one presence row exists for this population.
    pub roll_call_performed: bool,
}

/// Per-unit summary row.
#[derive(Debug, Clone, Serialize)]
pub struct UnitAttendanceSummary {
    pub unit_id: i64,
    pub unit_name: String,
    pub unit_color: Option<String>,
    #[serde(flatten)]
    pub tally: AttendanceTally,
}

/// Summary for the leadership/staff population.
#[derive(Debug, Clone, Serialize)]
pub struct LeadershipAttendanceSummary {
    #[serde(flatten)]
    pub tally: AttendanceTally,
}

/// Tallies one population against the encounter's presence rows.
///
/// `presences` is keyed by member id and may cover more members than the
/// population; only rows belonging to `population` are counted.
pub fn tally(population: &[i64], presences: &HashMap<i64, presence::Model>) -> AttendanceTally {
    let total = population.len() as i64;
    let mut present = 0i64;
    let mut roll_call_performed = false;

    for member_id in population {
        if let Some(row) = presences.get(member_id) {
            roll_call_performed = true;
            if row.status.is_present() {
                present += 1;
            }
        }
    }

    AttendanceTally {
        total_members: total,
        present,
        absent: total - present,
        percentage: percentage(present, total),
        roll_call_performed,
    }
}

// Integer round-half-up of present/total * 100.
fn percentage(present: i64, total: i64) -> i32 {
    if total == 0 {
        return 0;
    }
    ((present * 200 + total) / (2 * total)) as i32
}

/// One summary per unit, ordered by unit name.
pub async fn unit_summaries(
    db: &DbConn,
    encounter_id: i64,
) -> Result<Vec<UnitAttendanceSummary>, DbErr> {
    let units = unit::Model::all_ordered(db).await?;
    let members = member::Entity::find()
        .filter(member::Column::Active.eq(true))
        .all(db)
        .await?;
    let presences = presence_map(db, encounter_id).await?;

    Ok(units
        .into_iter()
        .map(|u| {
            let population: Vec<i64> = members
                .iter()
                .filter(|m| m.unit_id == Some(u.id))
                .map(|m| m.id)
                .collect();
            UnitAttendanceSummary {
                unit_id: u.id,
                unit_name: u.name,
                unit_color: u.color,
                tally: tally(&population, &presences),
            }
        })
        .collect())
}

/// The same computation scoped to the staff population.
pub async fn leadership_summary(
    db: &DbConn,
    encounter_id: i64,
) -> Result<LeadershipAttendanceSummary, DbErr> {
    let staff = member::Model::list_active(db, member::RosterScope::Leadership).await?;
    let population: Vec<i64> = staff.iter().map(|m| m.id).collect();
    let presences = presence_map(db, encounter_id).await?;

    Ok(LeadershipAttendanceSummary {
        tally: tally(&population, &presences),
    })
}

async fn presence_map(
    db: &DbConn,
    encounter_id: i64,
) -> Result<HashMap<i64, presence::Model>, DbErr> {
    Ok(presence::Model::find_for_encounter(db, encounter_id)
        .await?
        .into_iter()
        .map(|p| (p.member_id, p))
        .collect())
}
