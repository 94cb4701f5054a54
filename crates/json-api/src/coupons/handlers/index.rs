//! Coupon Index Handler

use salvo::prelude::*;

use crate::{
    coupons::{errors::into_status_error, responses::CouponResponse},
    extensions::*,
};

/// Coupon Index Handler
///
/// Returns every coupon, ordered by code.
#[endpoint(tags("coupons"), summary = "List Coupons")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CouponResponse>>, StatusError> {
    let state = depot.state_or_500()?;

    let coupons = state
        .coupons
        .list_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupons.into_iter().map(Into::into).collect()))
}
