//! Product domain entity and related types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::constants::{MAX_PRICE_CENTS, PRICE_SCALE};

/// Product domain entity.
///
/// `id` is assigned by the store on insert and never changes afterwards,
/// nor does `seller_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub seller_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    /// Soft delete timestamp (None = active, Some = deleted)
    pub deleted_at: Option<i64>,
}

/// Product data before the store has assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub seller_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: i64,
}

/// Partial change to an existing product. `None` fields keep their value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub id: i32,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub updated_at: i64,
}

/// Normalise a price to the stored scale.
pub fn normalize_price(price: Decimal) -> Decimal {
    price.round_dp(PRICE_SCALE)
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut err = ValidationError::new("price");
        err.message = Some("Price cannot be negative".into());
        return Err(err);
    }
    if normalize_price(*price) > Decimal::new(MAX_PRICE_CENTS, PRICE_SCALE) {
        let mut err = ValidationError::new("price");
        err.message = Some("Price is too large".into());
        return Err(err);
    }
    Ok(())
}

// =============================================================================
// Requests
// =============================================================================

/// Product creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddProductRequest {
    pub seller_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
}

/// Product update data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProductRequest {
    pub id: i32,
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
}

// =============================================================================
// Responses
// =============================================================================

/// Response after adding a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddProductResponse {
    pub id: i32,
    pub seller_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// Single product lookup response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindProductResponse {
    pub id: i32,
    pub seller_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Response after updating a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProductResponse {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product list element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_request() -> AddProductRequest {
        AddProductRequest {
            seller_id: Uuid::new_v4(),
            name: "Keyboard".into(),
            price: Decimal::new(4999, 2),
            quantity: 10,
        }
    }

    #[test]
    fn test_add_request_validation() {
        assert!(add_request().validate().is_ok());

        let free = AddProductRequest {
            price: Decimal::ZERO,
            quantity: 0,
            ..add_request()
        };
        assert!(free.validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let request = AddProductRequest {
            price: Decimal::new(-1, 2),
            ..add_request()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_price_beyond_column_precision_rejected() {
        let largest = AddProductRequest {
            price: Decimal::new(MAX_PRICE_CENTS, 2),
            ..add_request()
        };
        assert!(largest.validate().is_ok());

        let too_large = AddProductRequest {
            price: Decimal::new(10_000_000_000, 0),
            ..add_request()
        };
        assert!(too_large.validate().is_err());

        // Rounds up past the limit once normalised
        let rounds_over = UpdateProductRequest {
            id: 1,
            name: None,
            price: Some(Decimal::new(9_999_999_999_995, 3)),
            quantity: None,
        };
        assert!(rounds_over.validate().is_err());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let request = UpdateProductRequest {
            id: 1,
            name: None,
            price: None,
            quantity: Some(-3),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_update_is_valid() {
        let request = UpdateProductRequest {
            id: 1,
            name: None,
            price: None,
            quantity: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_normalize_price_rounds_to_cents() {
        assert_eq!(normalize_price(Decimal::new(19999, 3)), Decimal::new(2000, 2));
        assert_eq!(normalize_price(Decimal::new(1999, 2)), Decimal::new(1999, 2));
    }
}
