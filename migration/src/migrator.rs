use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202608120001_create_users::Migration),
            Box::new(migrations::m202608120002_create_org_units::Migration),
            Box::new(migrations::m202608120003_create_attendance::Migration),
        ]
    }
}
