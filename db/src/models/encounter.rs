use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::EncounterError;

/// One scheduled club gathering, the unit of attendance-taking.
///
/// Exactly one encounter may exist per calendar date. Status only ever moves
/// forward: scheduled -> in_progress -> finalized.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "encounters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_date: NaiveDate,
    pub description: Option<String>,
    pub status: Status,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString,
    Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "encounter_status_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "scheduled")]
    Scheduled,

    #[sea_orm(string_value = "in_progress")]
    InProgress,

    #[sea_orm(string_value = "finalized")]
    Finalized,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::presence::Entity")]
    Presences,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::presence::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Presences.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Optional list filters. `from`/`to` are inclusive bounds on the event date.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<Status>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Model {
    pub async fn create(
        db: &DbConn,
        event_date: NaiveDate,
        description: Option<&str>,
        created_by: i64,
    ) -> Result<Model, EncounterError> {
        if Entity::find()
            .filter(Column::EventDate.eq(event_date))
            .one(db)
            .await?
            .is_some()
        {
            return Err(EncounterError::DuplicateDate(event_date));
        }

        let now = Utc::now();
        let encounter = ActiveModel {
            event_date: Set(event_date),
            description: Set(description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_owned)),
            status: Set(Status::Scheduled),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(encounter.insert(db).await?)
    }

    pub async fn get(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Lists encounters newest first, with optional status and date-range
    /// filters. Returns the page of rows plus the total match count.
    pub async fn list(
        db: &DbConn,
        filter: ListFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Model>, u64), DbErr> {
        let mut sel = Entity::find();
        if let Some(status) = filter.status {
            sel = sel.filter(Column::Status.eq(status));
        }
        if let Some(from) = filter.from {
            sel = sel.filter(Column::EventDate.gte(from));
        }
        if let Some(to) = filter.to {
            sel = sel.filter(Column::EventDate.lte(to));
        }
        sel = sel.order_by_desc(Column::EventDate);

        let paginator = sel.paginate(db, per_page);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((rows, total))
    }

    /// Edits date and/or description of a non-finalized encounter.
    ///
    /// A date change re-runs the duplicate-date check, excluding this row's
    /// own id. An empty description clears the field.
    pub async fn update_details(
        db: &DbConn,
        id: i64,
        event_date: Option<NaiveDate>,
        description: Option<&str>,
    ) -> Result<Model, EncounterError> {
        let current = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(EncounterError::NotFound)?;

        if current.status == Status::Finalized {
            return Err(EncounterError::Finalized);
        }

        let mut encounter = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(date) = event_date {
            if date != current.event_date
                && Entity::find()
                    .filter(Column::EventDate.eq(date))
                    .filter(Column::Id.ne(id))
                    .one(db)
                    .await?
                    .is_some()
            {
                return Err(EncounterError::DuplicateDate(date));
            }
            encounter.event_date = Set(date);
        }

        if let Some(desc) = description {
            let trimmed = desc.trim();
            encounter.description = Set((!trimmed.is_empty()).then(|| trimmed.to_owned()));
        }

        Ok(encounter.update(db).await?)
    }

    /// Opens roll call: scheduled -> in_progress.
    ///
    /// Returns `Ok(false)` when the encounter was not in `scheduled` state
    /// (e.g. a concurrent actor already started it) or does not exist.
    pub async fn start(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        Self::transition(db, id, Status::Scheduled, Status::InProgress).await
    }

    /// Closes roll call: in_progress -> finalized.
    pub async fn finish(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        Self::transition(db, id, Status::InProgress, Status::Finalized).await
    }

    // Single conditional UPDATE so two concurrent actors cannot both win the
    // same transition; zero rows affected is the failure signal.
    async fn transition(db: &DbConn, id: i64, from: Status, to: Status) -> Result<bool, DbErr> {
        let res = Entity::update_many()
            .set(ActiveModel {
                status: Set(to),
                updated_at: Set(Utc::now()),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(from))
            .exec(db)
            .await?;

        Ok(res.rows_affected > 0)
    }

    /// Deletes an encounter that has no attendance records.
    pub async fn delete(db: &DbConn, id: i64) -> Result<(), EncounterError> {
        if super::presence::Model::exists_for_encounter(db, id).await? {
            return Err(EncounterError::HasPresence);
        }

        let res = Entity::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(EncounterError::NotFound);
        }
        Ok(())
    }
}
