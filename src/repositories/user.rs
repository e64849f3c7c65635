//! User repository
//!
//! Read-only access to the principals that seeded records are attributed to.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::models::user::{self, Entity as User};

/// Repository for user lookups
pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C> UserRepository<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a user by exact username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Picks the principal that seeded records are attributed to: the first
    /// superuser, else the first staff user, else any user. Ties are broken by
    /// username so the choice is stable between runs.
    pub async fn find_default_owner(&self) -> Result<Option<user::Model>, DbErr> {
        let superuser = User::find()
            .filter(user::Column::IsSuperuser.eq(true))
            .order_by_asc(user::Column::Username)
            .one(self.db)
            .await?;
        if superuser.is_some() {
            return Ok(superuser);
        }

        let staff = User::find()
            .filter(user::Column::IsStaff.eq(true))
            .order_by_asc(user::Column::Username)
            .one(self.db)
            .await?;
        if staff.is_some() {
            return Ok(staff);
        }

        User::find()
            .order_by_asc(user::Column::Username)
            .one(self.db)
            .await
    }
}
