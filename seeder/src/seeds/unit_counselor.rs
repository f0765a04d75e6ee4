use crate::seed::Seeder;
use db::models::{unit, unit_counselor, user};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

pub struct UnitCounselorSeeder;

#[async_trait::async_trait]
impl Seeder for UnitCounselorSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let units = unit::Model::all_ordered(db).await.unwrap_or_default();
        let counselors = user::Entity::find()
            .filter(user::Column::Role.eq(user::Role::Counselor))
            .order_by_asc(user::Column::Id)
            .all(db)
            .await
            .unwrap_or_default();

        for (u, c) in units.iter().zip(counselors.iter()) {
            let _ = unit_counselor::Model::assign(db, c.id, u.id, true).await;
        }
    }
}
