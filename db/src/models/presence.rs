use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::PaginatorTrait;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::PresenceError;
use crate::models::member::{self, RosterScope};

/// One member's attendance outcome for one encounter.
///
/// Rows are materialized lazily: none exists until the first save for that
/// member and encounter, and later saves update the same row (enforced by the
/// unique (encounter_id, member_id) key). Rows are never deleted here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "presences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub encounter_id: i64,
    pub member_id: i64,
    pub status: Status,
    pub has_material: bool,
    pub has_uniform: bool,
    pub note: Option<String>,
    pub recorded_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString,
    Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "presence_status_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "on_time")]
    OnTime,

    #[sea_orm(string_value = "late")]
    Late,

    #[sea_orm(string_value = "absent")]
    Absent,

    #[sea_orm(string_value = "excused_absence")]
    ExcusedAbsence,
}

impl Default for Status {
    fn default() -> Self {
        Status::Absent
    }
}

impl Status {
    /// Present for summary purposes: arrived, punctual or not.
    pub fn is_present(self) -> bool {
        matches!(self, Status::OnTime | Status::Late)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::encounter::Entity",
        from = "Column::EncounterId",
        to = "super::encounter::Column::Id"
    )]
    Encounter,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id"
    )]
    Member,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RecordedBy",
        to = "super::user::Column::Id"
    )]
    Recorder,
}

impl Related<super::encounter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Encounter.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// One item of a batch save: the full editable field set for one member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceItem {
    pub member_id: i64,
    pub status: Status,
    pub has_material: bool,
    pub has_uniform: bool,
    pub note: Option<String>,
}

/// One row of the merged roster view: a member joined with their presence
/// record, or with the unsaved sentinel defaults when no record exists yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub member_id: i64,
    pub member_name: String,
    pub unit_id: Option<i64>,
    pub class_id: Option<i64>,
    /// `None` until the first save for this member and encounter.
    pub presence_id: Option<i64>,
    pub status: Status,
    pub has_material: bool,
    pub has_uniform: bool,
    pub note: Option<String>,
    /// Distinguishes an explicitly-saved absence from the sentinel.
    pub recorded: bool,
}

impl RosterEntry {
    fn unsaved(m: &member::Model) -> Self {
        Self {
            member_id: m.id,
            member_name: m.full_name.clone(),
            unit_id: m.unit_id,
            class_id: m.class_id,
            presence_id: None,
            status: Status::default(),
            has_material: false,
            has_uniform: false,
            note: None,
            recorded: false,
        }
    }

    fn saved(m: &member::Model, p: Model) -> Self {
        Self {
            member_id: m.id,
            member_name: m.full_name.clone(),
            unit_id: m.unit_id,
            class_id: m.class_id,
            presence_id: Some(p.id),
            status: p.status,
            has_material: p.has_material,
            has_uniform: p.has_uniform,
            note: p.note,
            recorded: true,
        }
    }

    /// The full field set of this row, as it would be submitted back.
    pub fn to_item(&self) -> PresenceItem {
        PresenceItem {
            member_id: self.member_id,
            status: self.status,
            has_material: self.has_material,
            has_uniform: self.has_uniform,
            note: self.note.clone(),
        }
    }
}

impl Model {
    /// Saves a batch of presence records for one encounter.
    ///
    /// Items are applied in submission order. Each item is a single native
    /// upsert keyed on (encounter_id, member_id), so an individual write is
    /// atomic; the batch as a whole is not one transaction. The caller always
    /// resubmits the full visible set, so a partial failure heals itself on
    /// retry.
    ///
    /// Encounter state is intentionally not checked here; the editability
    /// matrix upstream owns that decision.
    pub async fn upsert_batch(
        db: &DbConn,
        encounter_id: i64,
        items: &[PresenceItem],
        recorded_by: i64,
    ) -> Result<usize, PresenceError> {
        let mut saved = 0usize;
        for item in items {
            let now = Utc::now();
            let row = ActiveModel {
                encounter_id: Set(encounter_id),
                member_id: Set(item.member_id),
                status: Set(item.status),
                has_material: Set(item.has_material),
                has_uniform: Set(item.has_uniform),
                note: Set(item.note.clone()),
                recorded_by: Set(recorded_by),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            Entity::insert(row)
                .on_conflict(
                    OnConflict::columns([Column::EncounterId, Column::MemberId])
                        .update_columns([
                            Column::Status,
                            Column::HasMaterial,
                            Column::HasUniform,
                            Column::Note,
                            Column::RecordedBy,
                            Column::UpdatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(db)
                .await?;
            saved += 1;
        }

        tracing::debug!(encounter_id, recorded_by, saved, "Presence batch saved");
        Ok(saved)
    }

    pub async fn find_by_natural_key(
        db: &DbConn,
        encounter_id: i64,
        member_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::EncounterId.eq(encounter_id))
            .filter(Column::MemberId.eq(member_id))
            .one(db)
            .await
    }

    pub async fn find_for_encounter(db: &DbConn, encounter_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::EncounterId.eq(encounter_id))
            .all(db)
            .await
    }

    pub async fn exists_for_encounter(db: &DbConn, encounter_id: i64) -> Result<bool, DbErr> {
        let n = Entity::find()
            .filter(Column::EncounterId.eq(encounter_id))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    /// Merges the active roster of the selected population with the
    /// encounter's presence rows, one entry per member, ordered by name.
    ///
    /// Members with no row yet come back with the sentinel defaults (absent,
    /// no material, no uniform) and `recorded: false`.
    pub async fn roster_view(
        db: &DbConn,
        encounter_id: i64,
        scope: RosterScope,
    ) -> Result<Vec<RosterEntry>, DbErr> {
        let members = member::Model::list_active(db, scope).await?;
        let rows = Self::find_for_encounter(db, encounter_id).await?;

        let mut by_member: HashMap<i64, Model> =
            rows.into_iter().map(|r| (r.member_id, r)).collect();

        Ok(members
            .iter()
            .map(|m| match by_member.remove(&m.id) {
                Some(p) => RosterEntry::saved(m, p),
                None => RosterEntry::unsaved(m),
            })
            .collect())
    }
}
