//! Coupons
//!
//! Domain model for a coupon-validation service: coupon terms and validity
//! windows, discount computation, eligibility rules, best-coupon selection and
//! the records written when a coupon is redeemed.
//!
//! Nothing here talks to storage. The service crates combine these types with
//! a key-value store that enforces single use.

pub mod checkout;
pub mod codes;
pub mod coupons;
pub mod discounts;
pub mod eligibility;
pub mod fixtures;
pub mod prelude;
pub mod redemptions;
pub mod selection;
