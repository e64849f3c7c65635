//! Migration to create the cargos table.
//!
//! Cargos (positions) belong to exactly one area. A cargo name is unique per
//! area, not globally: the same title may exist in two areas.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cargos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cargos::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cargos::AreaId).uuid().not_null())
                    .col(ColumnDef::new(Cargos::Name).text().not_null())
                    .col(ColumnDef::new(Cargos::Description).text().not_null())
                    .col(
                        ColumnDef::new(Cargos::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Cargos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Cargos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cargos_area_id")
                            .from(Cargos::Table, Cargos::AreaId)
                            .to(Areas::Table, Areas::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cargos_name_area")
                    .table(Cargos::Table)
                    .col(Cargos::Name)
                    .col(Cargos::AreaId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cargos_area_id")
                    .table(Cargos::Table)
                    .col(Cargos::AreaId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_cargos_name_area").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_cargos_area_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Cargos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cargos {
    Table,
    Id,
    AreaId,
    Name,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Areas {
    Table,
    Id,
}
