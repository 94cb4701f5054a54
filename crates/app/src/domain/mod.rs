//! Coupons Domain Concerns

pub mod coupons;
pub mod redemptions;
