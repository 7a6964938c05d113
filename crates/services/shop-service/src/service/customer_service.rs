//! Customer service - Handles customer-related business logic.
//!
//! Each method is one use-case running inside a single transaction:
//! validate, build the entity, call the repository, map the result.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use common::{AppResult, Context};
use domain::{
    CredentialCodec, Customer, CustomerUpdate, DeleteCustomerRequest, LoginCustomerRequest,
    LoginCustomerResponse, RegisterCustomerRequest, RegisterCustomerResponse,
    UpdateCustomerRequest, UpdateCustomerResponse,
};

use crate::infra::UnitOfWork;
use crate::repository::CustomerRepository;
use crate::with_transaction;

/// Customer service trait for dependency injection.
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Register a new customer with a freshly hashed password.
    async fn register_customer(
        &self,
        ctx: &Context,
        request: RegisterCustomerRequest,
    ) -> AppResult<RegisterCustomerResponse>;

    /// Check a password against the stored hash.
    ///
    /// An unknown email or a wrong password is `matched: false`, not an error.
    async fn login_customer(
        &self,
        ctx: &Context,
        request: LoginCustomerRequest,
    ) -> AppResult<LoginCustomerResponse>;

    /// Rename an active customer.
    async fn update_customer(
        &self,
        ctx: &Context,
        request: UpdateCustomerRequest,
    ) -> AppResult<UpdateCustomerResponse>;

    /// Soft delete a customer. Repeating it is a no-op.
    async fn delete_customer(&self, ctx: &Context, request: DeleteCustomerRequest)
        -> AppResult<()>;
}

/// Concrete implementation of CustomerService using Unit of Work.
pub struct CustomerManager<U: UnitOfWork> {
    uow: Arc<U>,
    customers: Arc<dyn CustomerRepository<U::Tx>>,
    codec: Arc<dyn CredentialCodec>,
}

impl<U: UnitOfWork> CustomerManager<U> {
    pub fn new(
        uow: Arc<U>,
        customers: Arc<dyn CustomerRepository<U::Tx>>,
        codec: Arc<dyn CredentialCodec>,
    ) -> Self {
        Self {
            uow,
            customers,
            codec,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> CustomerService for CustomerManager<U> {
    async fn register_customer(
        &self,
        ctx: &Context,
        request: RegisterCustomerRequest,
    ) -> AppResult<RegisterCustomerResponse> {
        let customers = Arc::clone(&self.customers);
        let codec = Arc::clone(&self.codec);

        let response: RegisterCustomerResponse = with_transaction!(self.uow, ctx, |tx| {
            request.validate()?;

            let registered_at = Utc::now().timestamp();
            let password = codec.hash(&request.password)?;
            let customer = Customer::register(request.email, request.name, password, registered_at);

            let saved = customers.register_customer(tx, customer).await?;
            Ok(RegisterCustomerResponse::from(saved))
        })?;

        tracing::info!(customer_id = %response.id, "Customer registered");
        Ok(response)
    }

    async fn login_customer(
        &self,
        ctx: &Context,
        request: LoginCustomerRequest,
    ) -> AppResult<LoginCustomerResponse> {
        let customers = Arc::clone(&self.customers);
        let codec = Arc::clone(&self.codec);

        with_transaction!(self.uow, ctx, |tx| {
            request.validate()?;

            let credentials = match customers.login_customer(tx, &request.email).await? {
                Some(credentials) => credentials,
                None => return Ok(LoginCustomerResponse::rejected()),
            };

            // A row without a hash can never match; skip the codec
            if credentials.password.is_empty() {
                return Ok(LoginCustomerResponse::rejected());
            }

            if codec.verify(&credentials.password, &request.password)? {
                Ok(LoginCustomerResponse::matched(credentials.id))
            } else {
                Ok(LoginCustomerResponse::rejected())
            }
        })
    }

    async fn update_customer(
        &self,
        ctx: &Context,
        request: UpdateCustomerRequest,
    ) -> AppResult<UpdateCustomerResponse> {
        let customers = Arc::clone(&self.customers);

        let response: UpdateCustomerResponse = with_transaction!(self.uow, ctx, |tx| {
            request.validate()?;

            let update = CustomerUpdate {
                email: request.email,
                name: request.name,
                updated_at: Utc::now().timestamp(),
            };

            let saved = customers.update_customer(tx, update).await?;
            Ok(UpdateCustomerResponse::from(saved))
        })?;

        tracing::info!("Customer updated");
        Ok(response)
    }

    async fn delete_customer(
        &self,
        ctx: &Context,
        request: DeleteCustomerRequest,
    ) -> AppResult<()> {
        let customers = Arc::clone(&self.customers);

        with_transaction!(self.uow, ctx, |tx| {
            request.validate()?;

            let deleted_at = Utc::now().timestamp();
            customers.delete_customer(tx, &request.email, deleted_at).await
        })?;

        tracing::info!("Customer deleted");
        Ok(())
    }
}
