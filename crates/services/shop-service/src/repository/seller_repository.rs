//! Seller repository implementation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};

use super::entities::seller::{self, ActiveModel, Entity as SellerEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{Seller, SellerUpdate};

/// Seller repository trait. Soft-deleted sellers are never matched.
#[async_trait]
pub trait SellerRepository<Tx: Sync>: Send + Sync {
    /// Insert a new seller row.
    ///
    /// An email already used by an active seller surfaces as
    /// `AppError::ConstraintViolation`.
    async fn register_seller(&self, tx: &Tx, seller: Seller) -> AppResult<Seller>;

    /// Change the name of an active seller, then re-read the row.
    async fn update_seller(&self, tx: &Tx, update: SellerUpdate) -> AppResult<Seller>;
}

/// SeaORM implementation of SellerRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct SellerStore;

impl SellerStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<C> SellerRepository<C> for SellerStore
where
    C: ConnectionTrait + Send + Sync,
{
    async fn register_seller(&self, tx: &C, seller: Seller) -> AppResult<Seller> {
        let active_model = ActiveModel {
            id: Set(seller.id),
            email: Set(seller.email),
            name: Set(seller.name),
            password: Set(seller.password.into_string()),
            registered_at: Set(seller.registered_at),
            updated_at: Set(seller.updated_at),
            deleted_at: Set(seller.deleted_at),
        };

        let model = active_model.insert(tx).await?;
        Ok(Seller::from(model))
    }

    async fn update_seller(&self, tx: &C, update: SellerUpdate) -> AppResult<Seller> {
        let result = SellerEntity::update_many()
            .col_expr(seller::Column::Name, Expr::value(update.name))
            .col_expr(seller::Column::UpdatedAt, Expr::value(update.updated_at))
            .filter(seller::Column::Email.eq(update.email.as_str()))
            .filter(seller::Column::DeletedAt.is_null())
            .exec(tx)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        SellerEntity::find()
            .filter(seller::Column::Email.eq(update.email.as_str()))
            .filter(seller::Column::DeletedAt.is_null())
            .one(tx)
            .await?
            .map(Seller::from)
            .ok_or_not_found()
    }
}
