//! Best Coupon Handler

use salvo::{
    oapi::extract::{JsonBody, QueryParam},
    prelude::*,
};

use crate::{
    coupons::{
        errors::into_status_error, requests::BestCouponRequest, responses::BestCouponResponse,
    },
    extensions::*,
};

/// Best Coupon Handler
///
/// Picks the valid, unexhausted coupon giving the largest discount on the
/// cart. Nothing is redeemed; when no coupon qualifies the response carries a
/// null coupon and a reason.
#[endpoint(
    tags("coupons"),
    summary = "Best Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Best coupon for the cart, if any"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BestCouponRequest>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<BestCouponResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let point_in_time = at.into_point_in_time()?;
    let request = json.into_inner();
    let cart = request.cart.into_cart()?;

    let offer = state
        .coupons
        .best_coupon(request.customer.into(), cart, point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(offer.into()))
}

#[cfg(test)]
mod tests {
    use coupons_app::domain::coupons::{MockCouponsService, models::BestCouponOffer};
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{coupons_service, make_coupon};

    use super::*;

    fn make_service(coupons: MockCouponsService) -> Service {
        coupons_service(coupons, Router::with_path("coupons/best").post(handler))
    }

    fn shopping_body() -> serde_json::Value {
        json!({
            "customer": { "id": "c-1", "tier": "GOLD", "orders_placed": 3 },
            "cart": { "items": [
                { "product_id": "p1", "category": "shoes", "unit_price": 4_000, "quantity": 1 }
            ] }
        })
    }

    #[tokio::test]
    async fn test_best_returns_the_offer() -> TestResult {
        let at: Timestamp = "2024-06-01T00:00:00Z".parse()?;
        let offer = BestCouponOffer {
            coupon: make_coupon("SAVE10")?,
            discount_amount: 400,
        };

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_best_coupon()
            .once()
            .withf(move |customer, cart, point_in_time| {
                customer.id == "c-1" && cart.total() == 4_000 && *point_in_time == at
            })
            .return_once(move |_, _, _| Ok(Some(offer)));

        let mut res = TestClient::post("http://example.com/coupons/best?at=2024-06-01T00:00:00Z")
            .json(&shopping_body())
            .send(&make_service(coupons))
            .await;

        let body: BestCouponResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.coupon.map(|coupon| coupon.code).as_deref(), Some("SAVE10"));
        assert_eq!(body.discount_amount, 400);
        assert_eq!(body.reason, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_no_offer_returns_a_reason() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_best_coupon()
            .once()
            .return_once(|_, _, _| Ok(None));

        let mut res = TestClient::post("http://example.com/coupons/best")
            .json(&shopping_body())
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(
            body,
            json!({
                "coupon": null,
                "discount_amount": 0,
                "reason": "No eligible coupons"
            })
        );

        Ok(())
    }
}
