//! # Catalog Seeder Library
//!
//! Idempotent seeding of reference catalogs (areas/cargos and
//! categorías/eventos) into a relational store, with summary and
//! verification reports.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod seeds;
pub mod telemetry;
pub use migration;
