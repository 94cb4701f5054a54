//! Coupon Errors

use coupons::coupons::InvalidCouponError;
use coupons_app::domain::coupons::CouponsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::InvalidInput(InvalidCouponError::DuplicateCode(code)) => {
            StatusError::conflict().brief(format!("Coupon code {code} already exists"))
        }
        CouponsServiceError::InvalidInput(invalid) => {
            StatusError::bad_request().brief(invalid.to_string())
        }
        CouponsServiceError::EmptyRedeemer => {
            StatusError::bad_request().brief("Redeemer id must not be empty")
        }
        CouponsServiceError::NotFound => StatusError::not_found().brief("Coupon not found"),
        CouponsServiceError::Expired => {
            StatusError::unprocessable_entity().brief("Coupon is not valid at this time")
        }
        CouponsServiceError::NotEligible(reason) => {
            StatusError::unprocessable_entity().brief(reason.to_string())
        }
        CouponsServiceError::AlreadyRedeemed => {
            StatusError::conflict().brief("Coupon has already been redeemed")
        }
        CouponsServiceError::CustomerLimitReached => StatusError::conflict()
            .brief("Customer has reached the redemption limit for this coupon"),
        CouponsServiceError::Fixture(source) => {
            error!("failed to load demo coupons: {source}");

            StatusError::internal_server_error()
        }
        CouponsServiceError::Store(source) => {
            error!("coupon store failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use coupons::eligibility::IneligibleReason;
    use coupons_app::store::StoreError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn errors_map_to_status_codes() {
        let cases = [
            (
                CouponsServiceError::InvalidInput(InvalidCouponError::NegativeDiscount),
                StatusCode::BAD_REQUEST,
            ),
            (CouponsServiceError::EmptyRedeemer, StatusCode::BAD_REQUEST),
            (CouponsServiceError::NotFound, StatusCode::NOT_FOUND),
            (CouponsServiceError::Expired, StatusCode::UNPROCESSABLE_ENTITY),
            (
                CouponsServiceError::NotEligible(IneligibleReason::Tier),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (CouponsServiceError::AlreadyRedeemed, StatusCode::CONFLICT),
            (CouponsServiceError::CustomerLimitReached, StatusCode::CONFLICT),
            (
                CouponsServiceError::Store(StoreError::InvalidTtl),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let description = error.to_string();

            assert_eq!(into_status_error(error).code, expected, "{description}");
        }
    }

    #[test]
    fn eligibility_reason_is_the_brief() {
        let status = into_status_error(CouponsServiceError::NotEligible(
            IneligibleReason::FirstOrderOnly,
        ));

        assert_eq!(status.brief, "coupon is only valid on a first order");
    }
}
