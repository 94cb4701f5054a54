//! Create Coupon Handler

use jiff::Timestamp;
use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    coupons::{
        errors::into_status_error, requests::CreateCouponRequest, responses::CouponResponse,
    },
    extensions::*,
};

/// Create Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Issue Coupon",
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon issued"),
        (status_code = StatusCode::CONFLICT, description = "Coupon code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid coupon terms"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let coupon = json.into_inner().into_new_coupon()?;

    let coupon = state
        .coupons
        .issue_coupon(coupon, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/coupons/{}", coupon.code), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(coupon.into()))
}
