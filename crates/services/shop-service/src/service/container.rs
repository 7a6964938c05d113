//! Service container - wires the store, repositories and codec together.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use common::{AppResult, Context, PasswordHashConfig};
use domain::{Argon2Codec, CredentialCodec};

use super::{
    CustomerManager, CustomerService, ProductManager, ProductService, SellerManager, SellerService,
};
use crate::infra::Persistence;
use crate::repository::{CustomerStore, ProductStore, SellerStore};

/// Centralized access to the use-cases.
pub struct Services {
    customer_service: Arc<dyn CustomerService>,
    seller_service: Arc<dyn SellerService>,
    product_service: Arc<dyn ProductService>,
    request_timeout: Option<Duration>,
}

impl Services {
    /// Create service container from an open connection pool.
    ///
    /// # Errors
    /// `AppError::Internal` if the password hash parameters are rejected.
    pub fn from_connection(
        db: DatabaseConnection,
        password_hash: &PasswordHashConfig,
        request_timeout: Option<Duration>,
    ) -> AppResult<Self> {
        let codec: Arc<dyn CredentialCodec> = Arc::new(Argon2Codec::new(
            password_hash.memory_kib,
            password_hash.iterations,
            password_hash.parallelism,
        )?);

        let uow = Arc::new(Persistence::new(db));
        let customer_service = Arc::new(CustomerManager::new(
            uow.clone(),
            Arc::new(CustomerStore::new()),
            codec.clone(),
        ));
        let seller_service = Arc::new(SellerManager::new(
            uow.clone(),
            Arc::new(SellerStore::new()),
            codec,
        ));
        let product_service = Arc::new(ProductManager::new(uow, Arc::new(ProductStore::new())));

        Ok(Self {
            customer_service,
            seller_service,
            product_service,
            request_timeout,
        })
    }

    pub fn customers(&self) -> Arc<dyn CustomerService> {
        self.customer_service.clone()
    }

    pub fn sellers(&self) -> Arc<dyn SellerService> {
        self.seller_service.clone()
    }

    pub fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    /// A fresh call context carrying the configured request deadline.
    pub fn context(&self) -> Context {
        Context::with_optional_timeout(self.request_timeout)
    }
}
