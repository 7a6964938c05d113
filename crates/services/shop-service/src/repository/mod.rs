//! Repository layer for data access.
//!
//! Repositories never open, commit or roll back transactions. Every call
//! runs on the connection or transaction handed in by the caller.

pub mod entities;
mod customer_repository;
mod product_repository;
mod seller_repository;

pub use customer_repository::{CustomerRepository, CustomerStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use seller_repository::{SellerRepository, SellerStore};
