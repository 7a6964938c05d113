//! Migration: Create sellers table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sellers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sellers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Sellers::Email).string().not_null())
                    .col(ColumnDef::new(Sellers::Name).string().not_null())
                    .col(ColumnDef::new(Sellers::Password).string().not_null())
                    .col(ColumnDef::new(Sellers::RegisteredAt).big_integer().not_null())
                    .col(ColumnDef::new(Sellers::UpdatedAt).big_integer().null())
                    .col(ColumnDef::new(Sellers::DeletedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sellers_email_active")
                    .table(Sellers::Table)
                    .col(Sellers::Email)
                    .unique()
                    .and_where(Expr::col(Sellers::DeletedAt).is_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sellers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sellers {
    Table,
    Id,
    Email,
    Name,
    Password,
    RegisteredAt,
    UpdatedAt,
    DeletedAt,
}
