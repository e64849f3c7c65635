//! Migration to create the eventos table.
//!
//! Events belong to one category and are unique per (title, category). The
//! table has no active flag; visibility is driven by `published`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Eventos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Eventos::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Eventos::CategoriaId).uuid().not_null())
                    .col(ColumnDef::new(Eventos::Title).text().not_null())
                    .col(ColumnDef::new(Eventos::Description).text().not_null())
                    .col(
                        ColumnDef::new(Eventos::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Eventos::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Eventos::IsPinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Eventos::AuthorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Eventos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Eventos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_eventos_categoria_id")
                            .from(Eventos::Table, Eventos::CategoriaId)
                            .to(Categorias::Table, Categorias::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_eventos_author_id")
                            .from(Eventos::Table, Eventos::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_eventos_title_categoria")
                    .table(Eventos::Table)
                    .col(Eventos::Title)
                    .col(Eventos::CategoriaId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_eventos_title_categoria").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Eventos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Eventos {
    Table,
    Id,
    CategoriaId,
    Title,
    Description,
    StartsAt,
    Published,
    IsPinned,
    AuthorId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Categorias {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
