//! Get Coupon Handler

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use crate::{
    coupons::{errors::into_status_error, responses::CouponDetailsResponse},
    extensions::*,
};

/// Get Coupon Handler
///
/// Returns a coupon, whether it is valid at `at` (default now) and its
/// redemptions so far.
#[endpoint(
    tags("coupons"),
    summary = "Get Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Coupon found"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unparseable \"at\" parameter"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CouponDetailsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let point_in_time = at.into_point_in_time()?;

    let details = state
        .coupons
        .get_coupon(code.into_inner(), point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
