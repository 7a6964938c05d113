//! Seller service - seller sign-up and profile changes.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use common::{AppResult, Context};
use domain::{
    CredentialCodec, RegisterSellerRequest, RegisterSellerResponse, Seller, SellerUpdate,
    UpdateSellerRequest, UpdateSellerResponse,
};

use crate::infra::UnitOfWork;
use crate::repository::SellerRepository;
use crate::with_transaction;

#[async_trait]
pub trait SellerService: Send + Sync {
    /// Register a new seller with a freshly hashed password.
    async fn register_seller(
        &self,
        ctx: &Context,
        request: RegisterSellerRequest,
    ) -> AppResult<RegisterSellerResponse>;

    /// Rename an active seller.
    async fn update_seller(
        &self,
        ctx: &Context,
        request: UpdateSellerRequest,
    ) -> AppResult<UpdateSellerResponse>;
}

pub struct SellerManager<U: UnitOfWork> {
    uow: Arc<U>,
    sellers: Arc<dyn SellerRepository<U::Tx>>,
    codec: Arc<dyn CredentialCodec>,
}

impl<U: UnitOfWork> SellerManager<U> {
    pub fn new(
        uow: Arc<U>,
        sellers: Arc<dyn SellerRepository<U::Tx>>,
        codec: Arc<dyn CredentialCodec>,
    ) -> Self {
        Self {
            uow,
            sellers,
            codec,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> SellerService for SellerManager<U> {
    async fn register_seller(
        &self,
        ctx: &Context,
        request: RegisterSellerRequest,
    ) -> AppResult<RegisterSellerResponse> {
        let sellers = Arc::clone(&self.sellers);
        let codec = Arc::clone(&self.codec);

        let response: RegisterSellerResponse = with_transaction!(self.uow, ctx, |tx| {
            request.validate()?;

            let password = codec.hash(&request.password)?;
            let seller = Seller::register(
                request.email,
                request.name,
                password,
                Utc::now().timestamp(),
            );

            let saved = sellers.register_seller(tx, seller).await?;
            Ok(RegisterSellerResponse::from(saved))
        })?;

        tracing::info!(seller_id = %response.id, "Seller registered");
        Ok(response)
    }

    async fn update_seller(
        &self,
        ctx: &Context,
        request: UpdateSellerRequest,
    ) -> AppResult<UpdateSellerResponse> {
        let sellers = Arc::clone(&self.sellers);

        let response: UpdateSellerResponse = with_transaction!(self.uow, ctx, |tx| {
            request.validate()?;

            let update = SellerUpdate {
                email: request.email,
                name: request.name,
                updated_at: Utc::now().timestamp(),
            };

            let saved = sellers.update_seller(tx, update).await?;
            Ok(UpdateSellerResponse::from(saved))
        })?;

        tracing::info!("Seller updated");
        Ok(response)
    }
}
