//! Product service - Handles product catalogue use-cases.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use common::{AppResult, Context};
use domain::{
    normalize_price, AddProductRequest, AddProductResponse, FindProductResponse, NewProduct,
    ProductSummary, ProductUpdate, UpdateProductRequest, UpdateProductResponse,
};

use crate::infra::UnitOfWork;
use crate::repository::ProductRepository;
use crate::with_transaction;

/// Product service trait for dependency injection.
///
/// Reads exclude soft-deleted products.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn add_product(
        &self,
        ctx: &Context,
        request: AddProductRequest,
    ) -> AppResult<AddProductResponse>;

    /// List active products. An empty catalogue is an empty list.
    async fn get_products(&self, ctx: &Context) -> AppResult<Vec<ProductSummary>>;

    async fn find_product(&self, ctx: &Context, id: i32) -> AppResult<FindProductResponse>;

    /// Change the provided fields of a product; the rest are kept.
    async fn update_product(
        &self,
        ctx: &Context,
        request: UpdateProductRequest,
    ) -> AppResult<UpdateProductResponse>;

    async fn delete_product(&self, ctx: &Context, id: i32) -> AppResult<()>;
}

/// Concrete implementation of ProductService using Unit of Work.
pub struct ProductManager<U: UnitOfWork> {
    uow: Arc<U>,
    products: Arc<dyn ProductRepository<U::Tx>>,
}

impl<U: UnitOfWork> ProductManager<U> {
    pub fn new(uow: Arc<U>, products: Arc<dyn ProductRepository<U::Tx>>) -> Self {
        Self { uow, products }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProductService for ProductManager<U> {
    async fn add_product(
        &self,
        ctx: &Context,
        request: AddProductRequest,
    ) -> AppResult<AddProductResponse> {
        let products = Arc::clone(&self.products);

        let response: AddProductResponse = with_transaction!(self.uow, ctx, |tx| {
            request.validate()?;

            let product = NewProduct {
                seller_id: request.seller_id,
                name: request.name,
                price: normalize_price(request.price),
                quantity: request.quantity,
                created_at: Utc::now().timestamp(),
            };

            let saved = products.add_product(tx, product).await?;
            Ok(AddProductResponse::from(saved))
        })?;

        tracing::info!(product_id = response.id, seller_id = %response.seller_id, "Product added");
        Ok(response)
    }

    async fn get_products(&self, ctx: &Context) -> AppResult<Vec<ProductSummary>> {
        let products = Arc::clone(&self.products);

        with_transaction!(self.uow, ctx, |tx| {
            let found = products.get_products(tx).await?;
            Ok(found.into_iter().map(ProductSummary::from).collect::<Vec<_>>())
        })
    }

    async fn find_product(&self, ctx: &Context, id: i32) -> AppResult<FindProductResponse> {
        let products = Arc::clone(&self.products);

        with_transaction!(self.uow, ctx, |tx| {
            let product = products.find_by_id(tx, id).await?;
            Ok(FindProductResponse::from(product))
        })
    }

    async fn update_product(
        &self,
        ctx: &Context,
        request: UpdateProductRequest,
    ) -> AppResult<UpdateProductResponse> {
        let products = Arc::clone(&self.products);

        let response: UpdateProductResponse = with_transaction!(self.uow, ctx, |tx| {
            request.validate()?;

            let update = ProductUpdate {
                id: request.id,
                name: request.name,
                price: request.price.map(normalize_price),
                quantity: request.quantity,
                updated_at: Utc::now().timestamp(),
            };

            let saved = products.update_product(tx, update).await?;
            Ok(UpdateProductResponse::from(saved))
        })?;

        tracing::info!(product_id = response.id, "Product updated");
        Ok(response)
    }

    async fn delete_product(&self, ctx: &Context, id: i32) -> AppResult<()> {
        let products = Arc::clone(&self.products);

        with_transaction!(self.uow, ctx, |tx| {
            let deleted_at = Utc::now().timestamp();
            products.delete_product(tx, id, deleted_at).await
        })?;

        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}
