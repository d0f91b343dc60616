pub use sea_orm_migration::prelude::*;

mod m20250301_000001_users;
mod m20250301_000002_work_projects;
mod m20250308_000001_purchases;
mod m20250315_000001_work_payments;
mod m20250412_000001_attachments;
mod m20250503_000001_catalogs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_users::Migration),
            Box::new(m20250301_000002_work_projects::Migration),
            Box::new(m20250308_000001_purchases::Migration),
            Box::new(m20250315_000001_work_payments::Migration),
            Box::new(m20250412_000001_attachments::Migration),
            Box::new(m20250503_000001_catalogs::Migration),
        ]
    }
}
