use crate::seed::Seeder;
use db::models::user::{Model, Role};
use sea_orm::DatabaseConnection;

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let _ = Model::create(db, "director", "director@club.test", "password123", Role::Admin).await;
        let _ = Model::create(
            db,
            "secretary",
            "secretary@club.test",
            "password123",
            Role::Secretariat,
        )
        .await;
        let _ = Model::create(
            db,
            "treasurer",
            "treasurer@club.test",
            "password123",
            Role::Treasurer,
        )
        .await;

        // One counselor account per seeded unit; linked by UnitCounselorSeeder.
        for i in 1..=4 {
            let username = format!("counselor{:02}", i);
            let email = format!("counselor{:02}@club.test", i);
            let _ = Model::create(db, &username, &email, "password123", Role::Counselor).await;
        }
    }
}
