//! Coupons service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use coupons::{
    checkout::{Cart, Customer},
    coupons::{Coupon, InvalidCouponError, NewCoupon},
    discounts::discount_amount,
    eligibility::IneligibleReason,
    fixtures,
    selection,
};
use jiff::Timestamp;
use mockall::automock;
use smallvec::SmallVec;
use tracing::{Span, info};

use crate::{
    domain::{
        coupons::{
            errors::CouponsServiceError,
            models::{BestCouponOffer, CouponDetails, RedeemCoupon, Redemption},
            registry::CouponRegistry,
        },
        redemptions::RedemptionGuard,
    },
    store::KeyValueStore,
};

/// Coupons service over a key-value store.
#[derive(Clone)]
pub struct StoreCouponsService {
    store: Arc<dyn KeyValueStore>,
    registry: CouponRegistry,
    guard: RedemptionGuard,
}

impl fmt::Debug for StoreCouponsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCouponsService")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl StoreCouponsService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            registry: CouponRegistry::new(Arc::clone(&store)),
            guard: RedemptionGuard::new(Arc::clone(&store)),
            store,
        }
    }

    #[must_use]
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.registry = self.registry.with_retention_days(days);
        self
    }

    /// Reject requests that would fail on eligibility or yield nothing.
    ///
    /// Runs before the guard so a rejected request never consumes a slot.
    fn check_context(
        coupon: &Coupon,
        redemption: &RedeemCoupon,
    ) -> Result<Option<u64>, CouponsServiceError> {
        if let Some(rules) = &coupon.eligibility {
            let (Some(customer), Some(cart)) = (&redemption.customer, &redemption.cart) else {
                return Err(IneligibleReason::ContextRequired.into());
            };

            rules.check(customer, cart)?;
        }

        if coupon.max_redemptions_per_customer.is_some()
            && redemption
                .customer
                .as_ref()
                .is_none_or(|customer| customer.id.trim().is_empty())
        {
            return Err(IneligibleReason::CustomerRequired.into());
        }

        let Some(cart) = &redemption.cart else {
            return Ok(None);
        };

        match discount_amount(coupon, cart.total()) {
            0 => Err(IneligibleReason::NoDiscount.into()),
            amount => Ok(Some(amount)),
        }
    }
}

#[async_trait]
impl CouponsService for StoreCouponsService {
    #[tracing::instrument(
        name = "coupons.service.issue_coupon",
        skip(self, coupon),
        fields(code = %coupon.code, discount_kind = %coupon.discount.kind.to_str()),
        err
    )]
    async fn issue_coupon(
        &self,
        coupon: NewCoupon,
        now: Timestamp,
    ) -> Result<Coupon, CouponsServiceError> {
        Ok(self.registry.issue(coupon, now).await?)
    }

    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError> {
        Ok(self.registry.list().await?)
    }

    #[tracing::instrument(name = "coupons.service.get_coupon", skip(self), err)]
    async fn get_coupon(
        &self,
        code: String,
        point_in_time: Timestamp,
    ) -> Result<CouponDetails, CouponsServiceError> {
        let coupon = self.registry.lookup(&code).await?;

        let redemptions: SmallVec<[_; 1]> = self
            .guard
            .redemptions(&coupon.code, coupon.max_redemptions)
            .await?
            .into_iter()
            .collect();

        let claimed = u32::try_from(redemptions.len()).unwrap_or(u32::MAX);

        Ok(CouponDetails {
            currently_valid: coupon.is_currently_valid(point_in_time),
            remaining_redemptions: coupon.max_redemptions.saturating_sub(claimed),
            redemptions,
            coupon,
        })
    }

    #[tracing::instrument(
        name = "coupons.service.redeem_coupon",
        skip(self, redemption),
        fields(
            redeemer_id = %redemption.redeemer_id,
            discount_amount = tracing::field::Empty
        ),
        err
    )]
    async fn redeem_coupon(
        &self,
        code: String,
        redemption: RedeemCoupon,
        point_in_time: Timestamp,
    ) -> Result<Redemption, CouponsServiceError> {
        let coupon = self.registry.lookup(&code).await?;

        if !coupon.is_currently_valid(point_in_time) {
            return Err(CouponsServiceError::Expired);
        }

        let discount_amount = Self::check_context(&coupon, &redemption)?;

        if let Some(amount) = discount_amount {
            Span::current().record("discount_amount", amount);
        }

        let record = match &redemption.customer {
            Some(customer) => {
                self.guard
                    .try_redeem_for_customer(
                        &coupon,
                        &customer.id,
                        &redemption.redeemer_id,
                        point_in_time,
                    )
                    .await?
            }
            None => {
                self.guard
                    .try_redeem(&coupon, &redemption.redeemer_id, point_in_time)
                    .await?
            }
        };

        Ok(Redemption {
            record,
            discount_amount,
        })
    }

    #[tracing::instrument(
        name = "coupons.service.best_coupon",
        skip(self, customer, cart),
        fields(cart_total = cart.total()),
        err
    )]
    async fn best_coupon(
        &self,
        customer: Customer,
        cart: Cart,
        point_in_time: Timestamp,
    ) -> Result<Option<BestCouponOffer>, CouponsServiceError> {
        let mut candidates = Vec::new();

        for coupon in self.registry.list().await? {
            if coupon.is_currently_valid(point_in_time)
                && !self.guard.is_exhausted(&coupon).await?
                && !self.guard.customer_limit_reached(&coupon, &customer.id).await?
            {
                candidates.push(coupon);
            }
        }

        Ok(
            selection::best_coupon(&candidates, &customer, &cart, point_in_time).map(|best| {
                BestCouponOffer {
                    coupon: best.coupon.clone(),
                    discount_amount: best.discount_amount,
                }
            }),
        )
    }

    async fn seed_demo_coupons(&self, now: Timestamp) -> Result<Vec<Coupon>, CouponsServiceError> {
        let mut seeded = Vec::new();

        for coupon in fixtures::demo_coupons(now)? {
            match self.registry.issue(coupon, now).await {
                Ok(coupon) => seeded.push(coupon),
                Err(error) => match CouponsServiceError::from(error) {
                    CouponsServiceError::InvalidInput(InvalidCouponError::DuplicateCode(code)) => {
                        info!(%code, "demo coupon already exists");
                    }
                    error => return Err(error),
                },
            }
        }

        Ok(seeded)
    }

    async fn check_store(&self) -> Result<(), CouponsServiceError> {
        Ok(self.store.ping().await?)
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Issues a new coupon.
    async fn issue_coupon(
        &self,
        coupon: NewCoupon,
        now: Timestamp,
    ) -> Result<Coupon, CouponsServiceError>;

    /// Lists every coupon, ordered by code.
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError>;

    /// Looks up a coupon with its validity and redemptions at a point in time.
    async fn get_coupon(
        &self,
        code: String,
        point_in_time: Timestamp,
    ) -> Result<CouponDetails, CouponsServiceError>;

    /// Validates a coupon against the request and consumes one redemption.
    async fn redeem_coupon(
        &self,
        code: String,
        redemption: RedeemCoupon,
        point_in_time: Timestamp,
    ) -> Result<Redemption, CouponsServiceError>;

    /// Finds the coupon giving the largest discount on a cart, if any qualifies.
    async fn best_coupon(
        &self,
        customer: Customer,
        cart: Cart,
        point_in_time: Timestamp,
    ) -> Result<Option<BestCouponOffer>, CouponsServiceError>;

    /// Issues the bundled demo coupons, skipping codes that already exist.
    async fn seed_demo_coupons(&self, now: Timestamp) -> Result<Vec<Coupon>, CouponsServiceError>;

    /// Checks that the backing store answers.
    async fn check_store(&self) -> Result<(), CouponsServiceError>;
}
