//! Service layer - transactional use-cases.

mod container;
mod customer_service;
mod product_service;
mod seller_service;

pub use container::Services;
pub use customer_service::{CustomerManager, CustomerService};
pub use product_service::{ProductManager, ProductService};
pub use seller_service::{SellerManager, SellerService};
