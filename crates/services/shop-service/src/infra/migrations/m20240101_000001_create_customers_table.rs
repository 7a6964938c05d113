//! Migration: Create customers table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Customers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Customers::Email).string().not_null())
                    .col(ColumnDef::new(Customers::Name).string().not_null())
                    .col(ColumnDef::new(Customers::Password).string().not_null())
                    .col(
                        ColumnDef::new(Customers::RegisteredAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Customers::UpdatedAt).big_integer().null())
                    .col(ColumnDef::new(Customers::DeletedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(active_email_index()).await?;

        // Active-customer filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_customers_deleted_at")
                    .table(Customers::Table)
                    .col(Customers::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

/// Email is unique among active customers only.
fn active_email_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_customers_email_active")
        .table(Customers::Table)
        .col(Customers::Email)
        .unique()
        .and_where(Expr::col(Customers::DeletedAt).is_null())
        .to_owned()
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
    Email,
    Name,
    Password,
    RegisteredAt,
    UpdatedAt,
    DeletedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_index_skips_deleted_rows() {
        let sql = active_email_index().to_string(PostgresQueryBuilder);

        assert!(sql.starts_with(r#"CREATE UNIQUE INDEX "idx_customers_email_active""#));
        assert!(sql.contains(r#"WHERE "deleted_at" IS NULL"#));
    }
}
