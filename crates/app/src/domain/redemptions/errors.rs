//! Redemption errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum RedemptionError {
    #[error("coupon has already been redeemed")]
    AlreadyRedeemed,

    #[error("redeemer id must not be empty")]
    EmptyRedeemer,

    #[error("customer has reached the redemption limit for this coupon")]
    CustomerLimitReached,

    #[error(transparent)]
    Store(#[from] StoreError),
}
