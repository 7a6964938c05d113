//! SeaORM entity definitions.

pub mod customer;
pub mod product;
pub mod seller;
