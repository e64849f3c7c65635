//! Reference-data seeding
//!
//! A [`Catalog`] of parents and ordered children is written through a
//! [`CatalogStore`] by the generic [`Seeder`], inside one transaction, and
//! read back into a [`RunReport`]. `areas` and `events` hold the two
//! compiled-in catalogs.

pub mod areas;
pub mod catalog;
pub mod events;
pub mod report;
pub mod seeder;
pub mod store;

pub use catalog::{Catalog, ChildGroup, ChildSeed, ParentSeed};
pub use seeder::{RunReport, SeedOptions, SeedSummary, Seeder, Verification};
pub use store::CatalogStore;
