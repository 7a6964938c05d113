//! Seller domain entity and related types.
//!
//! Sellers own products through `Product::seller_id` and sign up the same
//! way customers do.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::password::Password;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password: Password,
    pub registered_at: i64,
    pub updated_at: Option<i64>,
    pub deleted_at: Option<i64>,
}

impl Seller {
    /// Build a freshly registered seller with a new identity.
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

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Name change applied to the seller identified by `email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerUpdate {
    pub email: String,
    pub name: String,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterSellerRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSellerRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub name: String,
}

/// Registration response (never carries the password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterSellerResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateSellerResponse {
    pub email: String,
    pub name: String,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
