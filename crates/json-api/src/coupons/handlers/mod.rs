//! Coupon Handlers

pub(crate) mod best;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod redeem;
