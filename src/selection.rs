//! Best Coupon Selection

use std::cmp::Ordering;

use jiff::Timestamp;

use crate::{
    checkout::{Cart, Customer},
    coupons::Coupon,
    discounts::discount_amount,
};

/// The coupon giving the customer the largest discount on a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestCoupon<'a> {
    /// The selected coupon.
    pub coupon: &'a Coupon,

    /// Discount it yields, in minor units.
    pub discount_amount: u64,
}

/// Pick the best coupon for a customer and cart.
///
/// Candidates must be inside their validity window at `now`, satisfy their
/// eligibility rules and yield a positive discount. The highest discount wins;
/// ties go to the coupon that expires first, then to the smaller code.
///
/// Redemption limits are not known here, so callers filter exhausted coupons
/// out beforehand.
pub fn best_coupon<'a>(
    coupons: impl IntoIterator<Item = &'a Coupon>,
    customer: &Customer,
    cart: &Cart,
    now: Timestamp,
) -> Option<BestCoupon<'a>> {
    let cart_total = cart.total();

    coupons
        .into_iter()
        .filter(|coupon| coupon.is_currently_valid(now))
        .filter(|coupon| {
            coupon
                .eligibility
                .as_ref()
                .is_none_or(|rules| rules.check(customer, cart).is_ok())
        })
        .map(|coupon| BestCoupon {
            coupon,
            discount_amount: discount_amount(coupon, cart_total),
        })
        .filter(|candidate| candidate.discount_amount > 0)
        .min_by(rank)
}

fn rank(a: &BestCoupon<'_>, b: &BestCoupon<'_>) -> Ordering {
    b.discount_amount
        .cmp(&a.discount_amount)
        .then_with(|| a.coupon.valid_until.cmp(&b.coupon.valid_until))
        .then_with(|| a.coupon.code.cmp(&b.coupon.code))
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use jiff::ToSpan;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        checkout::CartItem,
        coupons::{Discount, NewCoupon},
        eligibility::Eligibility,
    };

    use super::*;

    fn now() -> Result<Timestamp, jiff::Error> {
        "2025-03-01T12:00:00Z".parse()
    }

    fn coupon(code: &str, discount: Discount, days: i64) -> TestResult<Coupon> {
        let now = now()?;
        let new = NewCoupon::new(
            code,
            discount,
            now.checked_sub(168.hours())?,
            now.checked_add((days * 24).hours())?,
        );

        Ok(new.into_coupon(Uuid::nil(), now)?)
    }

    fn cart(total: u64) -> TestResult<Cart> {
        Ok(Cart::new([CartItem {
            product_id: "shirt".to_string(),
            category: "fashion".to_string(),
            unit_price: total,
            quantity: NonZeroU32::MIN,
        }]))
    }

    #[test]
    fn highest_discount_wins() -> TestResult {
        let coupons = [
            coupon("FIVE", Discount::percentage(5), 10)?,
            coupon("FLAT", Discount::fixed_amount(2_000), 10)?,
            coupon("TEN", Discount::percentage(10), 10)?,
        ];

        let best = best_coupon(&coupons, &Customer::default(), &cart(30_000)?, now()?);

        assert_eq!(best.map(|b| b.coupon.code.as_str()), Some("TEN"));
        assert_eq!(best.map(|b| b.discount_amount), Some(3_000));

        Ok(())
    }

    #[test]
    fn ties_prefer_earliest_expiry_then_smallest_code() -> TestResult {
        let coupons = [
            coupon("LATE", Discount::fixed_amount(1_000), 30)?,
            coupon("SOON-B", Discount::fixed_amount(1_000), 5)?,
            coupon("SOON-A", Discount::fixed_amount(1_000), 5)?,
        ];

        let best = best_coupon(&coupons, &Customer::default(), &cart(10_000)?, now()?);

        assert_eq!(best.map(|b| b.coupon.code.as_str()), Some("SOON-A"));

        Ok(())
    }

    #[test]
    fn expired_ineligible_and_zero_discounts_are_skipped() -> TestResult {
        let expired = coupon("EXPIRED", Discount::percentage(50), -1)?;

        let mut gold_only = coupon("GOLD", Discount::percentage(40), 10)?;
        gold_only.eligibility = Some(Eligibility {
            allowed_tiers: vec!["GOLD".to_string()],
            ..Eligibility::default()
        });

        let nothing = coupon("NOTHING", Discount::percentage(0), 10)?;

        let coupons = [expired, gold_only, nothing];

        assert_eq!(
            best_coupon(&coupons, &Customer::default(), &cart(10_000)?, now()?),
            None
        );

        Ok(())
    }
}
