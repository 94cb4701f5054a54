//! Coupons
//!
//! A coupon is a discount code with terms and a validity window. Coupons are
//! built from a [`NewCoupon`], which is validated once at issue time; the
//! resulting [`Coupon`] is never mutated afterwards.

use jiff::Timestamp;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{codes::CouponCode, eligibility::Eligibility};

/// Reasons a coupon cannot be issued.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidCouponError {
    /// The code is empty after trimming.
    #[error("coupon code must not be empty")]
    EmptyCode,

    /// The code contains unsupported characters or is too long.
    #[error("coupon code {0:?} is malformed")]
    MalformedCode(String),

    /// Discount values must be zero or greater.
    #[error("discount value must not be negative")]
    NegativeDiscount,

    /// Percentage discounts are bounded by 100.
    #[error("percentage discount must not exceed 100")]
    PercentageAboveHundred,

    /// Fixed amounts are expressed in whole minor units.
    #[error("fixed discount amount must be a whole number of minor units")]
    FractionalAmount,

    /// The validity window must start strictly before it ends.
    #[error("valid_from must be earlier than valid_until")]
    EmptyWindow,

    /// Fixed amounts must fit in an unsigned 64-bit number of minor units.
    #[error("fixed discount amount is out of range")]
    AmountOutOfRange,

    /// A coupon that can never be redeemed is rejected.
    #[error("max_redemptions must be at least 1")]
    ZeroRedemptions,

    /// A per-customer limit of zero would lock every customer out.
    #[error("max_redemptions_per_customer must be at least 1")]
    ZeroRedemptionsPerCustomer,

    /// Another coupon already uses this code.
    #[error("coupon code {0} already exists")]
    DuplicateCode(CouponCode),
}

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// The value is a percentage of the cart total.
    Percentage,

    /// The value is an amount in minor currency units.
    FixedAmount,
}

impl DiscountKind {
    /// Stable string form, matching the serialised representation.
    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::FixedAmount => "fixed_amount",
        }
    }
}

/// Discount terms of a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// Interpretation of `value`.
    pub kind: DiscountKind,

    /// Percentage (0 to 100) or minor-unit amount, depending on `kind`.
    pub value: Decimal,
}

impl Discount {
    /// A percentage discount.
    #[must_use]
    pub fn percentage(value: impl Into<Decimal>) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value: value.into(),
        }
    }

    /// A fixed amount discount in minor units.
    #[must_use]
    pub fn fixed_amount(value: impl Into<Decimal>) -> Self {
        Self {
            kind: DiscountKind::FixedAmount,
            value: value.into(),
        }
    }

    fn validate(&self) -> Result<(), InvalidCouponError> {
        if self.value < Decimal::ZERO {
            return Err(InvalidCouponError::NegativeDiscount);
        }

        match self.kind {
            DiscountKind::Percentage if self.value > Decimal::ONE_HUNDRED => {
                Err(InvalidCouponError::PercentageAboveHundred)
            }
            DiscountKind::FixedAmount if !self.value.fract().is_zero() => {
                Err(InvalidCouponError::FractionalAmount)
            }
            DiscountKind::FixedAmount if self.value.to_u64().is_none() => {
                Err(InvalidCouponError::AmountOutOfRange)
            }
            DiscountKind::Percentage | DiscountKind::FixedAmount => Ok(()),
        }
    }
}

/// Parameters for issuing a coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoupon {
    /// Raw code as supplied by the caller; normalised during validation.
    pub code: String,

    /// Free text description.
    pub description: String,

    /// Discount terms.
    pub discount: Discount,

    /// Optional cap on percentage discounts, in minor units.
    pub max_discount_amount: Option<u64>,

    /// Start of the validity window (inclusive).
    pub valid_from: Timestamp,

    /// End of the validity window (inclusive).
    pub valid_until: Timestamp,

    /// How many times the coupon may be redeemed; defaults to once.
    pub max_redemptions: Option<u32>,

    /// How many times one customer may redeem the coupon; unlimited when unset.
    pub max_redemptions_per_customer: Option<u32>,

    /// Optional customer and cart rules.
    pub eligibility: Option<Eligibility>,
}

impl NewCoupon {
    /// A single-use coupon with no description, cap or eligibility rules.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        discount: Discount,
        valid_from: Timestamp,
        valid_until: Timestamp,
    ) -> Self {
        Self {
            code: code.into(),
            description: String::new(),
            discount,
            max_discount_amount: None,
            valid_from,
            valid_until,
            max_redemptions: None,
            max_redemptions_per_customer: None,
            eligibility: None,
        }
    }

    /// Validate the parameters and build the coupon.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidCouponError`] when the code is malformed, the discount
    /// value is negative (or out of range for its kind), the window is empty, or
    /// either redemption limit is zero.
    pub fn into_coupon(self, uuid: Uuid, created_at: Timestamp) -> Result<Coupon, InvalidCouponError> {
        let code = CouponCode::parse(&self.code)?;

        self.discount.validate()?;

        if self.valid_from >= self.valid_until {
            return Err(InvalidCouponError::EmptyWindow);
        }

        let max_redemptions = self.max_redemptions.unwrap_or(1);

        if max_redemptions == 0 {
            return Err(InvalidCouponError::ZeroRedemptions);
        }

        if self.max_redemptions_per_customer == Some(0) {
            return Err(InvalidCouponError::ZeroRedemptionsPerCustomer);
        }

        Ok(Coupon {
            uuid,
            code,
            description: self.description,
            discount: self.discount,
            max_discount_amount: self.max_discount_amount,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            max_redemptions,
            max_redemptions_per_customer: self.max_redemptions_per_customer,
            eligibility: self.eligibility,
            created_at,
        })
    }
}

/// An issued coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Informational identifier.
    pub uuid: Uuid,

    /// Unique, immutable code.
    pub code: CouponCode,

    /// Free text description.
    #[serde(default)]
    pub description: String,

    /// Discount terms.
    pub discount: Discount,

    /// Optional cap on percentage discounts, in minor units.
    #[serde(default)]
    pub max_discount_amount: Option<u64>,

    /// Start of the validity window (inclusive).
    pub valid_from: Timestamp,

    /// End of the validity window (inclusive).
    pub valid_until: Timestamp,

    /// How many redemptions the coupon allows.
    pub max_redemptions: u32,

    /// How many of those one customer may claim.
    #[serde(default)]
    pub max_redemptions_per_customer: Option<u32>,

    /// Optional customer and cart rules.
    #[serde(default)]
    pub eligibility: Option<Eligibility>,

    /// When the coupon was issued.
    pub created_at: Timestamp,
}

impl Coupon {
    /// Whether `now` falls inside the validity window, boundaries included.
    pub fn is_currently_valid(&self, now: Timestamp) -> bool {
        self.valid_from <= now && now <= self.valid_until
    }

    /// Whether the coupon allows exactly one redemption.
    pub fn is_single_use(&self) -> bool {
        self.max_redemptions == 1
    }
}
