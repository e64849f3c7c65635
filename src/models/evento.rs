//! Evento entity model
//!
//! Events scheduled under a category, unique per (title, categoria_id).
//! There is no active flag on this table.

use super::categoria::Entity as Categoria;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "eventos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub categoria_id: Uuid,

    pub title: String,

    pub description: String,

    /// When the event takes place
    pub starts_at: DateTimeWithTimeZone,

    pub published: bool,

    pub is_pinned: bool,

    pub author_id: Uuid,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Categoria",
        from = "Column::CategoriaId",
        to = "super::categoria::Column::Id"
    )]
    Categoria,
}

impl Related<Categoria> for Entity {
    fn to() -> RelationDef {
        Relation::Categoria.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
