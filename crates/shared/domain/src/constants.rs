//! Domain-level constants.
//!
//! Validation limits live on the request types as `validator` attributes;
//! the values here are the ones other layers need to agree on.

/// Scale of stored prices (`decimal(12, 2)`)
pub const PRICE_SCALE: u32 = 2;

/// Largest price a `decimal(12, 2)` column holds, in cents
pub const MAX_PRICE_CENTS: i64 = 999_999_999_999;
