//! Coupons service errors.

use coupons::{coupons::InvalidCouponError, eligibility::IneligibleReason, fixtures::FixtureError};
use thiserror::Error;

use crate::{domain::redemptions::RedemptionError, store::StoreError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Invalid(#[from] InvalidCouponError),

    #[error("coupon not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum CouponsServiceError {
    #[error("invalid coupon: {0}")]
    InvalidInput(#[source] InvalidCouponError),

    #[error("coupon not found")]
    NotFound,

    #[error("coupon is not valid at this time")]
    Expired,

    #[error("not eligible: {0}")]
    NotEligible(#[source] IneligibleReason),

    #[error("coupon has already been redeemed")]
    AlreadyRedeemed,

    #[error("customer has reached the redemption limit for this coupon")]
    CustomerLimitReached,

    #[error("redeemer id must not be empty")]
    EmptyRedeemer,

    #[error("failed to load coupon fixtures")]
    Fixture(#[from] FixtureError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<RegistryError> for CouponsServiceError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::Invalid(invalid) => Self::InvalidInput(invalid),
            RegistryError::NotFound => Self::NotFound,
            RegistryError::Store(store) => Self::Store(store),
        }
    }
}

impl From<RedemptionError> for CouponsServiceError {
    fn from(error: RedemptionError) -> Self {
        match error {
            RedemptionError::AlreadyRedeemed => Self::AlreadyRedeemed,
            RedemptionError::CustomerLimitReached => Self::CustomerLimitReached,
            RedemptionError::EmptyRedeemer => Self::EmptyRedeemer,
            RedemptionError::Store(store) => Self::Store(store),
        }
    }
}

impl From<StoreError> for CouponsServiceError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}

impl From<IneligibleReason> for CouponsServiceError {
    fn from(reason: IneligibleReason) -> Self {
        Self::NotEligible(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_keep_their_kind() {
        assert!(matches!(
            CouponsServiceError::from(RegistryError::NotFound),
            CouponsServiceError::NotFound
        ));
        assert!(matches!(
            CouponsServiceError::from(RegistryError::Invalid(InvalidCouponError::NegativeDiscount)),
            CouponsServiceError::InvalidInput(InvalidCouponError::NegativeDiscount)
        ));
    }

    #[test]
    fn redemption_errors_keep_their_kind() {
        assert!(matches!(
            CouponsServiceError::from(RedemptionError::AlreadyRedeemed),
            CouponsServiceError::AlreadyRedeemed
        ));
        assert!(matches!(
            CouponsServiceError::from(RedemptionError::CustomerLimitReached),
            CouponsServiceError::CustomerLimitReached
        ));
        assert!(matches!(
            CouponsServiceError::from(RedemptionError::Store(StoreError::InvalidTtl)),
            CouponsServiceError::Store(StoreError::InvalidTtl)
        ));
    }
}
