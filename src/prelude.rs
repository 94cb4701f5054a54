//! Coupons prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    checkout::{Cart, CartItem, Customer},
    codes::CouponCode,
    coupons::{Coupon, Discount, DiscountKind, InvalidCouponError, NewCoupon},
    discounts::discount_amount,
    eligibility::{Eligibility, IneligibleReason},
    redemptions::RedemptionRecord,
    selection::{BestCoupon, best_coupon},
};
