//! Migration to create the categorias table (event categories).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categorias::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categorias::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categorias::Name).text().not_null())
                    .col(ColumnDef::new(Categorias::Description).text().not_null())
                    .col(
                        ColumnDef::new(Categorias::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Categorias::CreatedBy).uuid().null())
                    .col(ColumnDef::new(Categorias::UpdatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Categorias::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Categorias::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categorias_created_by")
                            .from(Categorias::Table, Categorias::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categorias_updated_by")
                            .from(Categorias::Table, Categorias::UpdatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_categorias_name")
                    .table(Categorias::Table)
                    .col(Categorias::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Categorias::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Categorias {
    Table,
    Id,
    Name,
    Description,
    IsActive,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
