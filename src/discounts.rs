//! Discounts

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::coupons::{Coupon, DiscountKind};

/// Amount a coupon takes off a cart total, in minor units.
///
/// Fixed amounts never exceed the cart total. Percentages are rounded half
/// away from zero to whole minor units and then capped by the coupon's
/// `max_discount_amount`, when it has one.
pub fn discount_amount(coupon: &Coupon, cart_total: u64) -> u64 {
    match coupon.discount.kind {
        DiscountKind::FixedAmount => coupon
            .discount
            .value
            .to_u64()
            .map_or(cart_total, |amount| amount.min(cart_total)),
        DiscountKind::Percentage => {
            let raw = percentage_of(coupon.discount.value, cart_total);

            coupon
                .max_discount_amount
                .map_or(raw, |cap| raw.min(cap))
        }
    }
}

fn percentage_of(percentage: Decimal, total: u64) -> u64 {
    let Some(total) = Decimal::from_u64(total) else {
        return 0;
    };

    total
        .checked_mul(percentage)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .map(|amount| amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|amount| amount.to_u64())
        .unwrap_or(0)
}
