//! # Repository Layer
//!
//! Query helpers over SeaORM entities that are shared between seeders.

pub mod user;

pub use user::UserRepository;
