//! App Router

use salvo::Router;

use crate::coupons::handlers::{best, create, get, index, redeem};

pub(crate) fn app_router() -> Router {
    Router::with_path("coupons")
        .get(index::handler)
        .post(create::handler)
        .push(Router::with_path("best").post(best::handler))
        .push(
            Router::with_path("{code}")
                .get(get::handler)
                .push(Router::with_path("redeem").post(redeem::handler)),
        )
}

#[cfg(test)]
mod tests {
    use coupons_app::context::AppContext;
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        coupons::responses::{BestCouponResponse, CouponDetailsResponse},
        state::State,
    };

    use super::*;

    fn in_memory_service() -> Service {
        Service::new(
            Router::new()
                .hoop(inject(State::from_app_context(AppContext::in_memory())))
                .push(app_router()),
        )
    }

    async fn issue(service: &Service, code: &str, value: f64) -> StatusCode {
        TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": code,
                "discount": { "kind": "percentage", "value": value },
                "valid_from": "2024-01-01T00:00:00Z",
                "valid_until": "2099-12-31T00:00:00Z"
            }))
            .send(service)
            .await
            .status_code
            .unwrap_or(StatusCode::OK)
    }

    async fn redeem(service: &Service, code: &str, redeemer: &str) -> StatusCode {
        TestClient::post(format!("http://example.com/coupons/{code}/redeem"))
            .json(&json!({ "redeemer_id": redeemer }))
            .send(service)
            .await
            .status_code
            .unwrap_or(StatusCode::OK)
    }

    #[tokio::test]
    async fn single_use_coupon_is_redeemed_once() -> TestResult {
        let service = in_memory_service();

        assert_eq!(issue(&service, "SAVE10", 10.0).await, StatusCode::CREATED);
        assert_eq!(redeem(&service, "SAVE10", "order-1").await, StatusCode::CREATED);
        assert_eq!(redeem(&service, "SAVE10", "order-2").await, StatusCode::CONFLICT);

        let details: CouponDetailsResponse = TestClient::get("http://example.com/coupons/save10")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(details.remaining_redemptions, 0);
        assert_eq!(details.redemptions.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let service = in_memory_service();

        let res = TestClient::get("http://example.com/coupons/UNKNOWN")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(redeem(&service, "UNKNOWN", "order-1").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn negative_value_is_rejected_and_not_stored() {
        let service = in_memory_service();

        assert_eq!(issue(&service, "MINUS5", -5.0).await, StatusCode::BAD_REQUEST);

        let res = TestClient::get("http://example.com/coupons/MINUS5")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn best_coupon_prefers_the_larger_discount() -> TestResult {
        let service = in_memory_service();

        issue(&service, "SAVE10", 10.0).await;
        issue(&service, "SAVE25", 25.0).await;

        let best: BestCouponResponse = TestClient::post("http://example.com/coupons/best")
            .json(&json!({
                "customer": { "id": "c-1" },
                "cart": { "items": [
                    { "product_id": "p1", "category": "shoes", "unit_price": 2_000, "quantity": 1 }
                ] }
            }))
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(best.coupon.map(|coupon| coupon.code).as_deref(), Some("SAVE25"));
        assert_eq!(best.discount_amount, 500);

        Ok(())
    }

    #[tokio::test]
    async fn per_customer_limit_is_enforced_over_http() -> TestResult {
        let service = in_memory_service();

        let created = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "ONCEEACH",
                "discount": { "kind": "fixed_amount", "value": "500" },
                "valid_from": "2024-01-01T00:00:00Z",
                "valid_until": "2099-12-31T00:00:00Z",
                "max_redemptions": 10,
                "max_redemptions_per_customer": 1
            }))
            .send(&service)
            .await;

        assert_eq!(created.status_code, Some(StatusCode::CREATED));

        let redeem_as = |customer: &str, order: &str| {
            TestClient::post("http://example.com/coupons/ONCEEACH/redeem").json(&json!({
                "redeemer_id": order,
                "customer": { "id": customer }
            }))
        };

        let first = redeem_as("c-1", "order-1").send(&service).await;
        let again = redeem_as("c-1", "order-2").send(&service).await;
        let other = redeem_as("c-2", "order-3").send(&service).await;

        assert_eq!(first.status_code, Some(StatusCode::CREATED));
        assert_eq!(again.status_code, Some(StatusCode::CONFLICT));
        assert_eq!(other.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            redeem(&service, "ONCEEACH", "order-4").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let details: CouponDetailsResponse = TestClient::get("http://example.com/coupons/ONCEEACH")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(details.coupon.max_redemptions_per_customer, Some(1));
        assert_eq!(details.remaining_redemptions, 8);

        Ok(())
    }
}
