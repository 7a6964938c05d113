//! Customer domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::password::Password;

/// Customer domain entity.
///
/// Timestamps are epoch seconds as persisted; the mapper turns them into
/// calendar times for responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password: Password,
    pub registered_at: i64,
    pub updated_at: Option<i64>,
    /// Soft delete timestamp (None = active, Some = deleted)
    pub deleted_at: Option<i64>,
}

impl Customer {
    /// Build a freshly registered customer with a new identity.
    pub fn register(email: String, name: String, password: Password, registered_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password,
            registered_at,
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Check if customer is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Name change applied to the customer identified by `email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub email: String,
    pub name: String,
    pub updated_at: i64,
}

/// Identity and stored hash looked up for a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerCredentials {
    pub id: Uuid,
    pub password: Password,
}

// =============================================================================
// Requests
// =============================================================================

/// Customer registration data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterCustomerRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Customer login data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginCustomerRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Customer update data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub name: String,
}

/// Customer deletion data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteCustomerRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

// =============================================================================
// Responses
// =============================================================================

/// Registration response (never carries the password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterCustomerResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub registered_at: DateTime<Utc>,
}

/// Login outcome.
///
/// `customer_id` is only disclosed when the password matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginCustomerResponse {
    pub customer_id: Option<Uuid>,
    pub matched: bool,
}

impl LoginCustomerResponse {
    pub fn matched(customer_id: Uuid) -> Self {
        Self {
            customer_id: Some(customer_id),
            matched: true,
        }
    }

    pub fn rejected() -> Self {
        Self {
            customer_id: None,
            matched: false,
        }
    }
}

/// Update response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateCustomerResponse {
    pub email: String,
    pub name: String,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
