//! Coupon response bodies.

use coupons::{coupons::Coupon, redemptions::RedemptionRecord};
use coupons_app::domain::coupons::models::{BestCouponOffer, CouponDetails, Redemption};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coupons::requests::{DiscountKindBody, EligibilityBody};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountResponse {
    pub kind: DiscountKindBody,

    /// Exact decimal value
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    /// The unique identifier of the coupon
    pub uuid: Uuid,

    /// The normalised coupon code
    pub code: String,

    pub description: String,
    pub discount: DiscountResponse,
    pub max_discount_amount: Option<u64>,

    /// Start of the validity window
    pub valid_from: String,

    /// End of the validity window
    pub valid_until: String,

    pub max_redemptions: u32,
    pub max_redemptions_per_customer: Option<u32>,
    pub eligibility: Option<EligibilityBody>,

    /// The date and time the coupon was issued
    pub created_at: String,
}

impl From<Coupon> for CouponResponse {
    fn from(coupon: Coupon) -> Self {
        CouponResponse {
            uuid: coupon.uuid,
            code: coupon.code.to_string(),
            description: coupon.description,
            discount: DiscountResponse {
                kind: coupon.discount.kind.into(),
                value: coupon.discount.value.normalize().to_string(),
            },
            max_discount_amount: coupon.max_discount_amount,
            valid_from: coupon.valid_from.to_string(),
            valid_until: coupon.valid_until.to_string(),
            max_redemptions: coupon.max_redemptions,
            max_redemptions_per_customer: coupon.max_redemptions_per_customer,
            eligibility: coupon.eligibility.map(EligibilityBody::from),
            created_at: coupon.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RedemptionRecordResponse {
    pub redeemer_id: String,
    pub redeemed_at: String,
    pub slot: u32,
}

impl From<RedemptionRecord> for RedemptionRecordResponse {
    fn from(record: RedemptionRecord) -> Self {
        RedemptionRecordResponse {
            redeemer_id: record.redeemer_id,
            redeemed_at: record.redeemed_at.to_string(),
            slot: record.slot,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponDetailsResponse {
    pub coupon: CouponResponse,

    /// Whether the coupon is inside its validity window at the requested time
    pub currently_valid: bool,

    pub remaining_redemptions: u32,
    pub redemptions: Vec<RedemptionRecordResponse>,
}

impl From<CouponDetails> for CouponDetailsResponse {
    fn from(details: CouponDetails) -> Self {
        CouponDetailsResponse {
            coupon: details.coupon.into(),
            currently_valid: details.currently_valid,
            remaining_redemptions: details.remaining_redemptions,
            redemptions: details.redemptions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RedemptionResponse {
    pub code: String,
    pub redeemer_id: String,
    pub redeemed_at: String,
    pub slot: u32,

    /// Discount on the supplied cart, in minor units
    pub discount_amount: Option<u64>,
}

impl From<Redemption> for RedemptionResponse {
    fn from(redemption: Redemption) -> Self {
        let record = redemption.record;

        RedemptionResponse {
            code: record.code.to_string(),
            redeemer_id: record.redeemer_id,
            redeemed_at: record.redeemed_at.to_string(),
            slot: record.slot,
            discount_amount: redemption.discount_amount,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BestCouponResponse {
    /// The winning coupon, or null when nothing qualifies
    pub coupon: Option<CouponResponse>,

    /// Discount on the supplied cart, in minor units; 0 without a coupon
    pub discount_amount: u64,

    /// Why no coupon was offered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Option<BestCouponOffer>> for BestCouponResponse {
    fn from(offer: Option<BestCouponOffer>) -> Self {
        match offer {
            Some(offer) => BestCouponResponse {
                coupon: Some(offer.coupon.into()),
                discount_amount: offer.discount_amount,
                reason: None,
            },
            None => BestCouponResponse {
                coupon: None,
                discount_amount: 0,
                reason: Some("No eligible coupons".to_string()),
            },
        }
    }
}
