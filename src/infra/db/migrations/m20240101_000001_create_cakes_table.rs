//! Migration: Create the cakes table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cakes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cakes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cakes::Title).string().not_null())
                    .col(
                        ColumnDef::new(Cakes::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Cakes::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Cakes::Image).string().null())
                    .col(
                        ColumnDef::new(Cakes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Cakes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the list ordering (rating DESC, title ASC)
        manager
            .create_index(
                Index::create()
                    .name("idx_cakes_rating_title")
                    .table(Cakes::Table)
                    .col(Cakes::Rating)
                    .col(Cakes::Title)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cakes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cakes {
    Table,
    Id,
    Title,
    Description,
    Rating,
    Image,
    CreatedAt,
    UpdatedAt,
}
