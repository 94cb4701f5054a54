//! Best-coupon selection over the bundled demo coupons.
//!
//! The demo set holds three coupons, all starting at load time:
//!
//! - `WELCOME100`: 10000 off a first order of at least 50000, valid 30 days
//! - `GOLD10`: 10% for GOLD customers on carts of 100000 or more, capped at 50000, valid 60 days
//! - `FASHION5`: 5% off carts containing fashion, valid 10 days

use std::num::NonZeroU32;

use jiff::{SignedDuration, Timestamp};
use testresult::TestResult;
use uuid::Uuid;

use coupons::{fixtures::demo_coupons, prelude::*};

fn issued(now: Timestamp) -> TestResult<Vec<Coupon>> {
    Ok(demo_coupons(now)?
        .into_iter()
        .map(|coupon| coupon.into_coupon(Uuid::now_v7(), now))
        .collect::<Result<_, _>>()?)
}

fn cart(category: &str, unit_price: u64) -> TestResult<Cart> {
    Ok(Cart::new([CartItem {
        product_id: format!("{category}-1"),
        category: category.to_string(),
        unit_price,
        quantity: NonZeroU32::new(1).ok_or("quantity")?,
    }]))
}

fn customer(tier: Option<&str>, orders_placed: u32) -> Customer {
    Customer {
        id: "c-1".to_string(),
        tier: tier.map(str::to_string),
        orders_placed,
        ..Customer::default()
    }
}

fn best_code(
    coupons: &[Coupon],
    customer: &Customer,
    cart: &Cart,
    now: Timestamp,
) -> Option<(String, u64)> {
    best_coupon(coupons, customer, cart, now)
        .map(|best| (best.coupon.code.to_string(), best.discount_amount))
}

#[test]
fn first_order_gets_the_welcome_discount() -> TestResult {
    let now: Timestamp = "2024-03-01T09:00:00Z".parse()?;
    let coupons = issued(now)?;

    assert_eq!(
        best_code(&coupons, &customer(None, 0), &cart("fashion", 60_000)?, now),
        Some(("WELCOME100".to_string(), 10_000))
    );

    Ok(())
}

#[test]
fn gold_discount_is_capped() -> TestResult {
    let now: Timestamp = "2024-03-01T09:00:00Z".parse()?;
    let coupons = issued(now)?;
    let gold = customer(Some("GOLD"), 5);

    assert_eq!(
        best_code(&coupons, &gold, &cart("electronics", 200_000)?, now),
        Some(("GOLD10".to_string(), 20_000))
    );
    assert_eq!(
        best_code(&coupons, &gold, &cart("electronics", 1_000_000)?, now),
        Some(("GOLD10".to_string(), 50_000))
    );

    Ok(())
}

#[test]
fn expired_coupons_are_never_selected() -> TestResult {
    let now: Timestamp = "2024-03-01T09:00:00Z".parse()?;
    let coupons = issued(now)?;
    let regular = customer(None, 2);
    let fashion = cart("fashion", 10_000)?;

    assert_eq!(
        best_code(&coupons, &regular, &fashion, now),
        Some(("FASHION5".to_string(), 500))
    );

    let later = now.checked_add(SignedDuration::from_hours(11 * 24))?;

    assert_eq!(best_code(&coupons, &regular, &fashion, later), None);

    Ok(())
}

#[test]
fn nothing_qualifies_for_an_ordinary_cart() -> TestResult {
    let now: Timestamp = "2024-03-01T09:00:00Z".parse()?;
    let coupons = issued(now)?;

    assert_eq!(
        best_code(&coupons, &customer(Some("SILVER"), 4), &cart("garden", 2_000)?, now),
        None
    );

    Ok(())
}

#[test]
fn demo_coupons_allow_many_redemptions() -> TestResult {
    let now = Timestamp::now();

    for coupon in issued(now)? {
        assert!(!coupon.is_single_use(), "{} should be multi-use", coupon.code);
        assert!(coupon.is_currently_valid(now), "{} should be valid", coupon.code);
    }

    Ok(())
}
