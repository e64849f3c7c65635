//! # Data Models
//!
//! SeaORM entities for the catalog tables and the principals they are
//! attributed to.

pub mod area;
pub mod cargo;
pub mod categoria;
pub mod evento;
pub mod user;

pub use area::Entity as Area;
pub use cargo::Entity as Cargo;
pub use categoria::Entity as Categoria;
pub use evento::Entity as Evento;
pub use user::Entity as User;
