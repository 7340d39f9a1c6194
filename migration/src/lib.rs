pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_users_table;
mod m20250901_000002_create_announcement_tables;
mod m20250901_000003_create_user_activity_tables;
mod m20250901_000004_create_billing_and_operations_tables;
mod m20250901_000005_create_saved_searches_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_users_table::Migration),
            Box::new(m20250901_000002_create_announcement_tables::Migration),
            Box::new(m20250901_000003_create_user_activity_tables::Migration),
            Box::new(m20250901_000004_create_billing_and_operations_tables::Migration),
            Box::new(m20250901_000005_create_saved_searches_table::Migration),
        ]
    }
}
