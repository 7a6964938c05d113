//! Entity to response mapping.
//!
//! Pure conversions, one per (entity, response) pair. Each copies the fields
//! its response exposes and turns stored epoch seconds into calendar times.

use chrono::{DateTime, Utc};

use crate::customer::{Customer, RegisterCustomerResponse, UpdateCustomerResponse};
use crate::product::{
    AddProductResponse, FindProductResponse, Product, ProductSummary, UpdateProductResponse,
};
use crate::seller::{RegisterSellerResponse, Seller, UpdateSellerResponse};

/// Convert stored epoch seconds into a UTC calendar time.
///
/// Out-of-range values collapse to the Unix epoch.
pub fn epoch_to_datetime(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}

impl From<Customer> for RegisterCustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            email: customer.email,
            name: customer.name,
            registered_at: epoch_to_datetime(customer.registered_at),
        }
    }
}

impl From<Customer> for UpdateCustomerResponse {
    fn from(customer: Customer) -> Self {
        // An updated row always carries updated_at
        let updated_at = customer.updated_at.unwrap_or(customer.registered_at);
        Self {
            email: customer.email,
            name: customer.name,
            registered_at: epoch_to_datetime(customer.registered_at),
            updated_at: epoch_to_datetime(updated_at),
        }
    }
}

impl From<Seller> for RegisterSellerResponse {
    fn from(seller: Seller) -> Self {
        Self {
            id: seller.id,
            email: seller.email,
            name: seller.name,
            registered_at: epoch_to_datetime(seller.registered_at),
        }
    }
}

impl From<Seller> for UpdateSellerResponse {
    fn from(seller: Seller) -> Self {
        let updated_at = seller.updated_at.unwrap_or(seller.registered_at);
        Self {
            email: seller.email,
            name: seller.name,
            registered_at: epoch_to_datetime(seller.registered_at),
            updated_at: epoch_to_datetime(updated_at),
        }
    }
}

impl From<Product> for AddProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            seller_id: product.seller_id,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            created_at: epoch_to_datetime(product.created_at),
        }
    }
}

impl From<Product> for FindProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            seller_id: product.seller_id,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            created_at: epoch_to_datetime(product.created_at),
            updated_at: product.updated_at.map(epoch_to_datetime),
        }
    }
}

impl From<Product> for UpdateProductResponse {
    fn from(product: Product) -> Self {
        let updated_at = product.updated_at.unwrap_or(product.created_at);
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            created_at: epoch_to_datetime(product.created_at),
            updated_at: epoch_to_datetime(updated_at),
        }
    }
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
        }
    }
}
