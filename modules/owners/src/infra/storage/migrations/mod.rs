use sea_orm_migration::prelude::*;

mod m20240101_000001_create_owners;

/// Schema for owners, pets, pet types and visits. Tracked in its own
/// migration table so other modules can migrate the same database.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migration_table_name() -> DynIden {
        Alias::new("owners_migrations").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_owners::Migration)]
    }
}
