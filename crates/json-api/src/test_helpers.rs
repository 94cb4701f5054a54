//! Test helpers.

use std::sync::Arc;

use coupons::coupons::{Coupon, Discount, NewCoupon};
use coupons_app::{context::AppContext, domain::coupons::MockCouponsService};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;
use uuid::Uuid;

use crate::state::State;

pub(crate) fn state_with_coupons(coupons: MockCouponsService) -> Arc<State> {
    State::from_app_context(AppContext {
        coupons: Arc::new(coupons),
    })
}

pub(crate) fn coupons_service(coupons: MockCouponsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_coupons(coupons)))
            .push(route),
    )
}

pub(crate) fn save10_window() -> TestResult<(Timestamp, Timestamp)> {
    Ok((
        "2024-01-01T00:00:00Z".parse()?,
        "2024-12-31T23:59:59Z".parse()?,
    ))
}

pub(crate) fn make_coupon(code: &str) -> TestResult<Coupon> {
    let (from, until) = save10_window()?;

    Ok(NewCoupon::new(code, Discount::percentage(10), from, until).into_coupon(Uuid::nil(), from)?)
}
