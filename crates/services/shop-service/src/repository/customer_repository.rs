//! Customer repository implementation with soft delete support.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};

use super::entities::customer::{self, ActiveModel, Entity as CustomerEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{Customer, CustomerCredentials, CustomerUpdate};

/// Customer repository trait.
///
/// Generic over the handle the caller opened, so the same contract is
/// served by SeaORM transactions and by in-memory fakes. Query methods
/// exclude soft-deleted customers.
#[async_trait]
pub trait CustomerRepository<Tx: Sync>: Send + Sync {
    /// Insert a new customer row.
    ///
    /// A duplicate email surfaces as `AppError::ConstraintViolation`.
    async fn register_customer(&self, tx: &Tx, customer: Customer) -> AppResult<Customer>;

    /// Look up the id and stored hash of an active customer by email.
    ///
    /// `None` when nothing matches; that is not an error.
    async fn login_customer(&self, tx: &Tx, email: &str)
        -> AppResult<Option<CustomerCredentials>>;

    /// Change the name of an active customer, then re-read the row.
    async fn update_customer(&self, tx: &Tx, update: CustomerUpdate) -> AppResult<Customer>;

    /// Soft delete by email. Already deleted or unknown emails are a no-op.
    async fn delete_customer(&self, tx: &Tx, email: &str, deleted_at: i64) -> AppResult<()>;
}

/// SeaORM implementation of CustomerRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerStore;

impl CustomerStore {
    pub fn new() -> Self {
        Self
    }

    async fn find_active<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<Option<Customer>> {
        let model = CustomerEntity::find()
            .filter(customer::Column::Email.eq(email))
            .filter(customer::Column::DeletedAt.is_null())
            .one(db)
            .await?;

        Ok(model.map(Customer::from))
    }
}

#[async_trait]
impl<C> CustomerRepository<C> for CustomerStore
where
    C: ConnectionTrait + Send + Sync,
{
    async fn register_customer(&self, tx: &C, customer: Customer) -> AppResult<Customer> {
        let active_model = ActiveModel {
            id: Set(customer.id),
            email: Set(customer.email),
            name: Set(customer.name),
            password: Set(customer.password.into_string()),
            registered_at: Set(customer.registered_at),
            updated_at: Set(customer.updated_at),
            deleted_at: Set(customer.deleted_at),
        };

        let model = active_model.insert(tx).await?;
        Ok(Customer::from(model))
    }

    async fn login_customer(
        &self,
        tx: &C,
        email: &str,
    ) -> AppResult<Option<CustomerCredentials>> {
        let found = Self::find_active(tx, email).await?;

        Ok(found.map(|customer| CustomerCredentials {
            id: customer.id,
            password: customer.password,
        }))
    }

    async fn update_customer(&self, tx: &C, update: CustomerUpdate) -> AppResult<Customer> {
        let result = CustomerEntity::update_many()
            .col_expr(customer::Column::Name, Expr::value(update.name))
            .col_expr(customer::Column::UpdatedAt, Expr::value(update.updated_at))
            .filter(customer::Column::Email.eq(update.email.as_str()))
            .filter(customer::Column::DeletedAt.is_null())
            .exec(tx)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Self::find_active(tx, &update.email).await?.ok_or_not_found()
    }

    async fn delete_customer(&self, tx: &C, email: &str, deleted_at: i64) -> AppResult<()> {
        // Keep the first deletion timestamp on repeated calls
        CustomerEntity::update_many()
            .col_expr(customer::Column::DeletedAt, Expr::value(deleted_at))
            .filter(customer::Column::Email.eq(email))
            .filter(customer::Column::DeletedAt.is_null())
            .exec(tx)
            .await?;

        Ok(())
    }
}
