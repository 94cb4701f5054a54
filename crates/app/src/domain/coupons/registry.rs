//! Coupon registry.

use std::{fmt, sync::Arc, time::Duration};

use coupons::{
    codes::CouponCode,
    coupons::{Coupon, InvalidCouponError, NewCoupon},
};
use jiff::{SignedDuration, Timestamp};
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::coupons::errors::RegistryError,
    store::{KeyValueStore, StoreError},
};

const COUPON_PREFIX: &str = "coupon:";

/// Coupon definitions, stored as JSON under `coupon:{CODE}`.
///
/// Every issued code is also reserved under `issued:{CODE}` without a TTL.
/// Redemption records never expire, so a code must stay taken after its
/// coupon record is dropped by retention.
#[derive(Clone)]
pub struct CouponRegistry {
    store: Arc<dyn KeyValueStore>,
    retention: Option<SignedDuration>,
}

impl fmt::Debug for CouponRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CouponRegistry")
            .field("retention", &self.retention)
            .finish_non_exhaustive()
    }
}

impl CouponRegistry {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            retention: None,
        }
    }

    /// Let the store forget coupons `days` after they stop being valid.
    #[must_use]
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention = Some(SignedDuration::from_hours(i64::from(days) * 24));
        self
    }

    /// Validate and persist a new coupon.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Invalid`] for invalid terms or a code that is
    /// already taken, or the underlying store failure.
    pub async fn issue(&self, coupon: NewCoupon, now: Timestamp) -> Result<Coupon, RegistryError> {
        let coupon = coupon.into_coupon(Uuid::now_v7(), now)?;

        let value = serde_json::to_string(&coupon).map_err(StoreError::from)?;

        let reserved = self
            .store
            .set_if_absent(&reservation_key(&coupon.code), &coupon.uuid.to_string(), None)
            .await?;

        let written = reserved
            && self
                .store
                .set_if_absent(&coupon_key(&coupon.code), &value, self.ttl_for(&coupon, now))
                .await?;

        if !written {
            return Err(InvalidCouponError::DuplicateCode(coupon.code).into());
        }

        info!(code = %coupon.code, uuid = %coupon.uuid, "issued coupon");

        Ok(coupon)
    }

    /// Fetch a coupon by code. The code is normalised first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for unknown or malformed codes.
    pub async fn lookup(&self, code: &str) -> Result<Coupon, RegistryError> {
        // A malformed code can never have been issued.
        let code = CouponCode::parse(code).map_err(|_malformed| RegistryError::NotFound)?;

        let value = self
            .store
            .get(&coupon_key(&code))
            .await?
            .ok_or(RegistryError::NotFound)?;

        Ok(serde_json::from_str(&value).map_err(StoreError::from)?)
    }

    /// Every stored coupon, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or holds an unreadable record.
    pub async fn list(&self) -> Result<Vec<Coupon>, RegistryError> {
        let coupons = self
            .store
            .values_with_prefix(COUPON_PREFIX)
            .await?
            .iter()
            .map(|value| serde_json::from_str(value))
            .collect::<Result<Vec<Coupon>, _>>()
            .map_err(StoreError::from)?;

        Ok(coupons)
    }

    fn ttl_for(&self, coupon: &Coupon, now: Timestamp) -> Option<Duration> {
        let retention = self.retention?;

        let ttl = coupon
            .valid_until
            .duration_since(now)
            .saturating_add(retention)
            .max(SignedDuration::from_secs(1));

        Duration::try_from(ttl).ok()
    }
}

fn coupon_key(code: &CouponCode) -> String {
    format!("{COUPON_PREFIX}{code}")
}

fn reservation_key(code: &CouponCode) -> String {
    format!("issued:{code}")
}
