use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202601050001_create_users::Migration),
            Box::new(migrations::m202601050002_create_units::Migration),
            Box::new(migrations::m202601050003_create_members::Migration),
            Box::new(migrations::m202601050004_create_unit_counselors::Migration),
            Box::new(migrations::m202601120001_create_encounters::Migration),
            Box::new(migrations::m202601120002_create_presences::Migration),
        ]
    }
}
