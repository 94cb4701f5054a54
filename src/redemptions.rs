//! Redemption Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::codes::CouponCode;

/// Proof that a coupon was consumed.
///
/// A record is written exactly once per redemption slot and never updated.
/// Single-use coupons have one slot, numbered 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionRecord {
    /// The redeemed coupon.
    pub code: CouponCode,

    /// Opaque identifier of whoever redeemed it, such as an order id.
    pub redeemer_id: String,

    /// When the redemption was claimed.
    pub redeemed_at: Timestamp,

    /// Which of the coupon's redemption slots this record occupies.
    pub slot: u32,
}

impl RedemptionRecord {
    /// Creates a record for the given slot.
    pub fn new(
        code: CouponCode,
        redeemer_id: impl Into<String>,
        redeemed_at: Timestamp,
        slot: u32,
    ) -> Self {
        Self {
            code,
            redeemer_id: redeemer_id.into(),
            redeemed_at,
            slot,
        }
    }
}
