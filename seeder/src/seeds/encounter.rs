use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::{encounter, user};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

pub struct EncounterSeeder;

#[async_trait::async_trait]
impl Seeder for EncounterSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let Ok(Some(admin)) = user::Entity::find()
            .filter(user::Column::Role.eq(user::Role::Admin))
            .one(db)
            .await
        else {
            return;
        };

        let today = Utc::now().date_naive();

        // A few past Saturdays plus the upcoming one; dates are unique by
        // construction.
        for weeks_ago in (0..4).rev() {
            let date = today - Duration::weeks(weeks_ago);
            let _ = encounter::Model::create(db, date, Some("Encontro regular"), admin.id).await;
        }
    }
}
