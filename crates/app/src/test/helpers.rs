//! Test Helpers

use coupons::coupons::{Coupon, Discount, NewCoupon};
use jiff::Timestamp;
use testresult::TestResult;
use uuid::Uuid;

/// The 2024 calendar year used by the `SAVE10` scenarios.
pub(crate) fn save10_window() -> TestResult<(Timestamp, Timestamp)> {
    Ok((
        "2024-01-01T00:00:00Z".parse()?,
        "2024-12-31T23:59:59Z".parse()?,
    ))
}

/// A single-use 10% coupon valid for [`save10_window`].
pub(crate) fn new_coupon(code: &str) -> TestResult<NewCoupon> {
    let (from, until) = save10_window()?;

    Ok(NewCoupon::new(code, Discount::percentage(10), from, until))
}

pub(crate) fn coupon(code: &str) -> TestResult<Coupon> {
    let (from, _) = save10_window()?;

    Ok(new_coupon(code)?.into_coupon(Uuid::now_v7(), from)?)
}

pub(crate) fn multi_use_coupon(code: &str, max_redemptions: u32) -> TestResult<Coupon> {
    let (from, _) = save10_window()?;

    let mut coupon = new_coupon(code)?;
    coupon.max_redemptions = Some(max_redemptions);

    Ok(coupon.into_coupon(Uuid::now_v7(), from)?)
}

pub(crate) fn limited_coupon(
    code: &str,
    max_redemptions: u32,
    per_customer: u32,
) -> TestResult<Coupon> {
    let (from, _) = save10_window()?;

    let mut coupon = new_coupon(code)?;
    coupon.max_redemptions = Some(max_redemptions);
    coupon.max_redemptions_per_customer = Some(per_customer);

    Ok(coupon.into_coupon(Uuid::now_v7(), from)?)
}
