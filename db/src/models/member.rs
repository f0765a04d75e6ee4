use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::Serialize;

/// A club member eligible for roll call.
///
/// Rank-and-file members belong to a unit; leadership/staff members carry the
/// `staff` flag instead and are summarized as their own population.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    pub unit_id: Option<i64>,
    pub class_id: Option<i64>,
    pub staff: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id"
    )]
    Unit,
    #[sea_orm(has_many = "super::presence::Entity")]
    Presences,
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::presence::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Presences.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Which population a roster is drawn from. The two selectors are mutually
/// exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterScope {
    Unit(i64),
    Leadership,
}

impl Model {
    pub async fn create(
        db: &DbConn,
        full_name: &str,
        unit_id: Option<i64>,
        class_id: Option<i64>,
        staff: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let member = ActiveModel {
            full_name: Set(full_name.to_owned()),
            unit_id: Set(unit_id),
            class_id: Set(class_id),
            staff: Set(staff),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        member.insert(db).await
    }

    /// Active members of the given population, ordered by name.
    pub async fn list_active(db: &DbConn, scope: RosterScope) -> Result<Vec<Model>, DbErr> {
        let mut sel = Entity::find().filter(Column::Active.eq(true));
        sel = match scope {
            RosterScope::Unit(unit_id) => sel.filter(Column::UnitId.eq(unit_id)),
            RosterScope::Leadership => sel.filter(Column::Staff.eq(true)),
        };
        sel.order_by_asc(Column::FullName).all(db).await
    }
}
