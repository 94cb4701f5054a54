//! Redeem Coupon Handler

use coupons_app::domain::coupons::models::RedeemCoupon;
use jiff::Timestamp;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    coupons::{
        errors::into_status_error, requests::RedeemCouponRequest, responses::RedemptionResponse,
    },
    extensions::*,
    observability::observe_redemption,
};

/// Redeem Coupon Handler
///
/// Consumes one redemption of a coupon. Concurrent requests for the last
/// redemption have exactly one winner; the others get a 409.
#[endpoint(
    tags("coupons"),
    summary = "Redeem Coupon",
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon redeemed"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::CONFLICT, description = "Coupon used up, overall or by this customer"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Coupon expired or customer not eligible"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    json: JsonBody<RedeemCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RedemptionResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();

    let redemption = RedeemCoupon {
        redeemer_id: request.redeemer_id,
        customer: request.customer.map(Into::into),
        cart: request.cart.map(|cart| cart.into_cart()).transpose()?,
    };

    let result = state
        .coupons
        .redeem_coupon(code.into_inner(), redemption, Timestamp::now())
        .await;

    observe_redemption(&result);

    let redemption = result.map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(redemption.into()))
}
