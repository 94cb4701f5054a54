//! Redemption guard.

use std::sync::Arc;

use coupons::{codes::CouponCode, coupons::Coupon, redemptions::RedemptionRecord};
use jiff::Timestamp;
use tracing::{debug, info};

use crate::{
    domain::redemptions::errors::RedemptionError,
    store::{KeyValueStore, StoreError},
};

/// Claims redemption slots with the store's atomic `set_if_absent`.
///
/// A coupon allowing `n` redemptions owns the keys `redemption:{CODE}:1` to
/// `redemption:{CODE}:n`. Claimers only try slot `k + 1` after finding slot `k`
/// taken, so claimed slots are always contiguous from 1.
///
/// Coupons with a per-customer limit `m` also own
/// `customer-redemption:{CODE}:{CUSTOMER}:1` to `..:m` for every customer,
/// claimed the same way before the coupon slot.
///
/// The guard trusts its caller to have checked that the coupon exists and is
/// inside its validity window.
#[derive(Clone)]
pub struct RedemptionGuard {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for RedemptionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedemptionGuard").finish_non_exhaustive()
    }
}

impl RedemptionGuard {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Claim the next free redemption slot of `coupon` for `redeemer_id`.
    ///
    /// Single-use coupons cost exactly one `set_if_absent` call.
    ///
    /// # Errors
    ///
    /// Returns [`RedemptionError::AlreadyRedeemed`] when every slot is taken,
    /// [`RedemptionError::EmptyRedeemer`] for a blank redeemer id, or the
    /// underlying store failure.
    #[tracing::instrument(
        name = "redemptions.guard.try_redeem",
        skip(self, coupon),
        fields(code = %coupon.code, max_redemptions = coupon.max_redemptions),
        err
    )]
    pub async fn try_redeem(
        &self,
        coupon: &Coupon,
        redeemer_id: &str,
        now: Timestamp,
    ) -> Result<RedemptionRecord, RedemptionError> {
        if redeemer_id.trim().is_empty() {
            return Err(RedemptionError::EmptyRedeemer);
        }

        let first_slot = if coupon.is_single_use() {
            1
        } else {
            self.claimed_slots(&coupon.code).await?.saturating_add(1)
        };

        for slot in first_slot..=coupon.max_redemptions {
            let record = RedemptionRecord::new(coupon.code.clone(), redeemer_id, now, slot);

            if self.claim(&record).await? {
                info!(slot, "redeemed coupon");

                return Ok(record);
            }

            debug!(slot, "redemption slot already taken");
        }

        Err(RedemptionError::AlreadyRedeemed)
    }

    /// Claim a redemption of `coupon` on behalf of `customer_id`.
    ///
    /// Coupons without a per-customer limit behave exactly like
    /// [`Self::try_redeem`].
    ///
    /// # Errors
    ///
    /// Returns [`RedemptionError::CustomerLimitReached`] when the customer has
    /// used up their share, otherwise the errors of [`Self::try_redeem`].
    #[tracing::instrument(
        name = "redemptions.guard.try_redeem_for_customer",
        skip(self, coupon),
        fields(code = %coupon.code),
        err
    )]
    pub async fn try_redeem_for_customer(
        &self,
        coupon: &Coupon,
        customer_id: &str,
        redeemer_id: &str,
        now: Timestamp,
    ) -> Result<RedemptionRecord, RedemptionError> {
        let Some(limit) = coupon.max_redemptions_per_customer else {
            return self.try_redeem(coupon, redeemer_id, now).await;
        };

        if redeemer_id.trim().is_empty() {
            return Err(RedemptionError::EmptyRedeemer);
        }

        // Leave the customer's slots alone once the coupon itself is used up.
        if self.is_exhausted(coupon).await? {
            return Err(RedemptionError::AlreadyRedeemed);
        }

        self.claim_customer_slot(coupon, customer_id, redeemer_id, limit, now)
            .await?;

        self.try_redeem(coupon, redeemer_id, now).await
    }

    /// Whether `customer_id` has claimed every redemption allowed per customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn customer_limit_reached(
        &self,
        coupon: &Coupon,
        customer_id: &str,
    ) -> Result<bool, RedemptionError> {
        let Some(limit) = coupon.max_redemptions_per_customer else {
            return Ok(false);
        };

        let last_slot = customer_slot_key(&coupon.code, customer_id, limit);

        Ok(self.store.get(&last_slot).await?.is_some())
    }

    /// Read back the redemption records of a coupon, ordered by slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or holds an unreadable record.
    pub async fn redemptions(
        &self,
        code: &CouponCode,
        max_redemptions: u32,
    ) -> Result<Vec<RedemptionRecord>, RedemptionError> {
        let mut records = self
            .store
            .values_with_prefix(&slots_prefix(code))
            .await?
            .iter()
            .map(|value| serde_json::from_str::<RedemptionRecord>(value))
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)?;

        records.retain(|record| record.slot <= max_redemptions);
        records.sort_by_key(|record| record.slot);

        Ok(records)
    }

    /// Whether every redemption slot of `coupon` has been claimed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn is_exhausted(&self, coupon: &Coupon) -> Result<bool, RedemptionError> {
        let last_slot = slot_key(&coupon.code, coupon.max_redemptions);

        Ok(self.store.get(&last_slot).await?.is_some())
    }

    async fn claim(&self, record: &RedemptionRecord) -> Result<bool, RedemptionError> {
        let value = serde_json::to_string(record).map_err(StoreError::from)?;

        Ok(self
            .store
            .set_if_absent(&slot_key(&record.code, record.slot), &value, None)
            .await?)
    }

    async fn claim_customer_slot(
        &self,
        coupon: &Coupon,
        customer_id: &str,
        redeemer_id: &str,
        limit: u32,
        now: Timestamp,
    ) -> Result<(), RedemptionError> {
        for slot in 1..=limit {
            let record = RedemptionRecord::new(coupon.code.clone(), redeemer_id, now, slot);
            let value = serde_json::to_string(&record).map_err(StoreError::from)?;
            let key = customer_slot_key(&coupon.code, customer_id, slot);

            if self.store.set_if_absent(&key, &value, None).await? {
                debug!(slot, "claimed customer redemption slot");

                return Ok(());
            }
        }

        Err(RedemptionError::CustomerLimitReached)
    }

    async fn claimed_slots(&self, code: &CouponCode) -> Result<u32, RedemptionError> {
        let claimed = self.store.values_with_prefix(&slots_prefix(code)).await?.len();

        Ok(u32::try_from(claimed).unwrap_or(u32::MAX))
    }
}

fn slots_prefix(code: &CouponCode) -> String {
    format!("redemption:{code}:")
}

fn slot_key(code: &CouponCode, slot: u32) -> String {
    format!("redemption:{code}:{slot}")
}

// The slot is always the last segment, so customer ids containing `:` stay unambiguous.
fn customer_slot_key(code: &CouponCode, customer_id: &str, slot: u32) -> String {
    format!("customer-redemption:{code}:{customer_id}:{slot}")
}
