use crate::seed::Seeder;
use db::models::{member, unit};
use fake::{Fake, faker::name::en::Name};
use sea_orm::DatabaseConnection;

pub struct MemberSeeder;

#[async_trait::async_trait]
impl Seeder for MemberSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let units = unit::Model::all_ordered(db).await.unwrap_or_default();

        for u in &units {
            for _ in 0..8 {
                let full_name: String = Name().fake();
                let class_id = Some(fastrand::i64(1..=6));
                let _ = member::Model::create(db, &full_name, Some(u.id), class_id, false).await;
            }
        }

        // Leadership/staff population.
        for _ in 0..5 {
            let full_name: String = Name().fake();
            let _ = member::Model::create(db, &full_name, None, None, true).await;
        }
    }
}
