use crate::seed::Seeder;
use db::models::unit::Model;
use sea_orm::DatabaseConnection;

pub struct UnitSeeder;

#[async_trait::async_trait]
impl Seeder for UnitSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        for (name, color) in [
            ("Falcão", "azul"),
            ("Gavião", "verde"),
            ("Pantera", "preto"),
            ("Tucano", "amarelo"),
        ] {
            let _ = Model::create(db, name, Some(color)).await;
        }
    }
}
