//! Coupons

pub mod errors;
pub mod models;
mod registry;
pub mod service;

pub use errors::{CouponsServiceError, RegistryError};
pub use registry::CouponRegistry;
pub use service::*;
