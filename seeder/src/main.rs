use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    encounter::EncounterSeeder, member::MemberSeeder, unit::UnitSeeder,
    unit_counselor::UnitCounselorSeeder, user::UserSeeder,
};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;

    Migrator::up(&db, None).await.expect("Migrations failed");

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(UnitSeeder), "Unit"),
        (Box::new(MemberSeeder), "Member"),
        (Box::new(UnitCounselorSeeder), "UnitCounselor"),
        (Box::new(EncounterSeeder), "Encounter"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
