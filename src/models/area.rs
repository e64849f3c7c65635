//! Area entity model
//!
//! Parent records of the administrative catalog. `name` is unique.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

/// Administrative area (e.g. "Tecnología")
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "areas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Unique display name of the area
    #[sea_orm(unique)]
    pub name: String,

    pub description: String,

    pub is_active: bool,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cargo::Entity")]
    Cargos,
}

impl Related<super::cargo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cargos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
