//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20241001_000001_create_faculty;
mod m20241001_000002_create_student;
mod m20241001_000003_create_avatar;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241001_000001_create_faculty::Migration),
            Box::new(m20241001_000002_create_student::Migration),
            Box::new(m20241001_000003_create_avatar::Migration),
        ]
    }
}
