//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Customers, sellers, products, their request/response shapes and the
//! credential codec are shared by the service and its tests.

pub mod constants;
pub mod customer;
pub mod error;
pub mod mapper;
pub mod password;
pub mod product;
pub mod seller;

pub use constants::*;
pub use customer::{
    Customer, CustomerCredentials, CustomerUpdate, DeleteCustomerRequest, LoginCustomerRequest,
    LoginCustomerResponse, RegisterCustomerRequest, RegisterCustomerResponse,
    UpdateCustomerRequest, UpdateCustomerResponse,
};
pub use error::{DomainError, DomainResult};
pub use mapper::epoch_to_datetime;
pub use password::{Argon2Codec, CredentialCodec, Password};
pub use product::{
    normalize_price, AddProductRequest, AddProductResponse, FindProductResponse, NewProduct,
    Product, ProductSummary, ProductUpdate, UpdateProductRequest, UpdateProductResponse,
};
pub use seller::{
    RegisterSellerRequest, RegisterSellerResponse, Seller, SellerUpdate, UpdateSellerRequest,
    UpdateSellerResponse,
};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockCredentialCodec;
