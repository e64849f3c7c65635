//! Database migrations for the catalog seeder.
//!
//! Each catalog table carries a unique index on its natural key; seeding
//! relies on those indexes for idempotence.

pub use sea_orm_migration::prelude::*;

mod m2025_10_20_090000_create_users;
mod m2025_10_20_090100_create_areas;
mod m2025_10_20_090200_create_cargos;
mod m2025_10_20_090300_create_categorias;
mod m2025_10_20_090400_create_eventos;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_10_20_090000_create_users::Migration),
            Box::new(m2025_10_20_090100_create_areas::Migration),
            Box::new(m2025_10_20_090200_create_cargos::Migration),
            Box::new(m2025_10_20_090300_create_categorias::Migration),
            Box::new(m2025_10_20_090400_create_eventos::Migration),
        ]
    }
}
