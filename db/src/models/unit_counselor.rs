use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Links a counselor account to the unit it is responsible for.
///
/// A unit may have several counselors; at most one of them carries the
/// `principal` designation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "unit_counselors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub unit_id: i64,
    pub principal: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id"
    )]
    Unit,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A counselor's resolved unit linkage.
#[derive(Debug, Clone, Serialize)]
pub struct CounselorUnit {
    pub unit_id: i64,
    pub unit_name: String,
    pub principal: bool,
}

impl Model {
    pub async fn assign(
        db: &DbConn,
        user_id: i64,
        unit_id: i64,
        principal: bool,
    ) -> Result<Model, DbErr> {
        let link = ActiveModel {
            user_id: Set(user_id),
            unit_id: Set(unit_id),
            principal: Set(principal),
        };

        link.insert(db).await
    }

    /// Resolves the unit a counselor is responsible for, or `None` when the
    /// account has no unit linkage.
    pub async fn unit_for_counselor(
        db: &DbConn,
        user_id: i64,
    ) -> Result<Option<CounselorUnit>, DbErr> {
        let Some(link) = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let unit = super::unit::Entity::find_by_id(link.unit_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::Custom(format!("Unit {} missing for counselor", link.unit_id)))?;

        Ok(Some(CounselorUnit {
            unit_id: unit.id,
            unit_name: unit.name,
            principal: link.principal,
        }))
    }
}
