//! Product repository implementation with soft delete support.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{NewProduct, Product, ProductUpdate};

/// Product repository trait.
///
/// Query methods exclude soft-deleted products.
#[async_trait]
pub trait ProductRepository<Tx: Sync>: Send + Sync {
    /// Insert a product; the store assigns the id.
    async fn add_product(&self, tx: &Tx, product: NewProduct) -> AppResult<Product>;

    /// All active products ordered by id. Empty when there are none.
    async fn get_products(&self, tx: &Tx) -> AppResult<Vec<Product>>;

    /// Active product by id, `AppError::NotFound` otherwise.
    async fn find_by_id(&self, tx: &Tx, id: i32) -> AppResult<Product>;

    /// Apply the provided fields, then re-read the row.
    async fn update_product(&self, tx: &Tx, update: ProductUpdate) -> AppResult<Product>;

    /// Soft delete by id. Already deleted or unknown ids are a no-op.
    async fn delete_product(&self, tx: &Tx, id: i32, deleted_at: i64) -> AppResult<()>;
}

/// SeaORM implementation of ProductRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductStore;

impl ProductStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<C> ProductRepository<C> for ProductStore
where
    C: ConnectionTrait + Send + Sync,
{
    async fn add_product(&self, tx: &C, product: NewProduct) -> AppResult<Product> {
        let active_model = ActiveModel {
            id: NotSet,
            seller_id: Set(product.seller_id),
            name: Set(product.name),
            price: Set(product.price),
            quantity: Set(product.quantity),
            created_at: Set(product.created_at),
            updated_at: Set(None),
            deleted_at: Set(None),
        };

        let model = active_model.insert(tx).await?;
        Ok(Product::from(model))
    }

    async fn get_products(&self, tx: &C) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .filter(product::Column::DeletedAt.is_null())
            .order_by_asc(product::Column::Id)
            .all(tx)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, tx: &C, id: i32) -> AppResult<Product> {
        ProductEntity::find_by_id(id)
            .filter(product::Column::DeletedAt.is_null())
            .one(tx)
            .await?
            .map(Product::from)
            .ok_or_not_found()
    }

    async fn update_product(&self, tx: &C, update: ProductUpdate) -> AppResult<Product> {
        // seller_id and created_at are never written here
        let mut query = ProductEntity::update_many()
            .col_expr(product::Column::UpdatedAt, Expr::value(update.updated_at));

        if let Some(name) = update.name {
            query = query.col_expr(product::Column::Name, Expr::value(name));
        }
        if let Some(price) = update.price {
            query = query.col_expr(product::Column::Price, Expr::value(price));
        }
        if let Some(quantity) = update.quantity {
            query = query.col_expr(product::Column::Quantity, Expr::value(quantity));
        }

        let result = query
            .filter(product::Column::Id.eq(update.id))
            .filter(product::Column::DeletedAt.is_null())
            .exec(tx)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        <Self as ProductRepository<C>>::find_by_id(self, tx, update.id).await
    }

    async fn delete_product(&self, tx: &C, id: i32, deleted_at: i64) -> AppResult<()> {
        ProductEntity::update_many()
            .col_expr(product::Column::DeletedAt, Expr::value(deleted_at))
            .filter(product::Column::Id.eq(id))
            .filter(product::Column::DeletedAt.is_null())
            .exec(tx)
            .await?;

        Ok(())
    }
}
