//! Redemptions

pub mod errors;
mod guard;

pub use errors::RedemptionError;
pub use guard::RedemptionGuard;
