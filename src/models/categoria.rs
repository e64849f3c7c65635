//! Categoria entity model
//!
//! Event categories. `name` is unique; `created_by`/`updated_by` reference
//! the principal that seeded the row.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categorias")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub name: String,

    pub description: String,

    pub is_active: bool,

    pub created_by: Option<Uuid>,

    pub updated_by: Option<Uuid>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::evento::Entity")]
    Eventos,
}

impl Related<super::evento::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Eventos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
