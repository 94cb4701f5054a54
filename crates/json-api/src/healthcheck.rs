//! Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` when the store answers
    pub status: String,
}

/// Healthcheck handler
///
/// Answers 200 once the coupon store responds and 503 otherwise.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Store reachable"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Store unreachable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.state_or_500()?;

    if let Err(source) = state.coupons.check_store().await {
        warn!("healthcheck failed: {source}");

        return Err(StatusError::service_unavailable().brief("Coupon store is unreachable"));
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use coupons_app::{
        domain::coupons::{CouponsServiceError, MockCouponsService},
        store::StoreError,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::coupons_service;

    use super::*;

    fn make_service(coupons: MockCouponsService) -> Service {
        coupons_service(coupons, Router::with_path("healthcheck").get(handler))
    }

    #[tokio::test]
    async fn test_healthy_store_returns_ok() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons.expect_check_store().once().return_once(|| Ok(()));

        let response: HealthResponse = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(coupons))
            .await
            .take_json()
            .await?;

        assert_eq!(response.status, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_store_returns_503() {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_check_store()
            .once()
            .return_once(|| Err(CouponsServiceError::Store(StoreError::InvalidTtl)));

        let res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
    }
}
