//! User entity model
//!
//! Principals that seeded records are attributed to. Read-only from the
//! seeder's point of view.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Login name, unique across users
    #[sea_orm(unique)]
    pub username: String,

    pub email: Option<String>,

    pub is_superuser: bool,

    pub is_staff: bool,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Human-facing identifier: the email when present, otherwise the username.
    pub fn display_identity(&self) -> &str {
        self.email
            .as_deref()
            .filter(|email| !email.is_empty())
            .unwrap_or(&self.username)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
