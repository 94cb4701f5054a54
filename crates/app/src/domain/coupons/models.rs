//! Coupons service models.

use coupons::{
    checkout::{Cart, Customer},
    coupons::Coupon,
    redemptions::RedemptionRecord,
};
use smallvec::SmallVec;

/// A coupon together with its redemption state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponDetails {
    pub coupon: Coupon,
    pub currently_valid: bool,

    /// Claimed redemptions, ordered by slot. Most coupons are single-use.
    pub redemptions: SmallVec<[RedemptionRecord; 1]>,
    pub remaining_redemptions: u32,
}

/// A request to consume one redemption of a coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemCoupon {
    pub redeemer_id: String,
    pub customer: Option<Customer>,
    pub cart: Option<Cart>,
}

impl RedeemCoupon {
    /// A redemption without customer or cart context.
    #[must_use]
    pub fn new(redeemer_id: impl Into<String>) -> Self {
        Self {
            redeemer_id: redeemer_id.into(),
            customer: None,
            cart: None,
        }
    }
}

/// A successful redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redemption {
    pub record: RedemptionRecord,

    /// Discount granted on the supplied cart, if one was supplied.
    pub discount_amount: Option<u64>,
}

/// The best coupon for a cart, owned so it can outlive the coupon listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestCouponOffer {
    pub coupon: Coupon,
    pub discount_amount: u64,
}
