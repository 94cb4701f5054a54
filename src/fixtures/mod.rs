//! Fixtures
//!
//! Demo coupons described in YAML. Validity windows are relative: each
//! fixture starts at the moment it is loaded and lasts `valid_for_days`.

use std::{fs, path::Path};

use jiff::{SignedDuration, Timestamp};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    coupons::{Discount, NewCoupon},
    eligibility::Eligibility,
};

const DEMO_COUPONS_YAML: &str = include_str!("../../fixtures/coupons.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The validity window does not fit in a timestamp
    #[error("Invalid validity window for {code}: {source}")]
    Window {
        /// Fixture code
        code: String,

        /// Underlying arithmetic error
        #[source]
        source: jiff::Error,
    },
}

#[derive(Debug, Deserialize)]
struct CouponsFixture {
    coupons: Vec<CouponFixture>,
}

#[derive(Debug, Deserialize)]
struct CouponFixture {
    code: String,
    #[serde(default)]
    description: String,
    discount: Discount,
    #[serde(default)]
    max_discount_amount: Option<u64>,
    valid_for_days: u32,
    #[serde(default)]
    max_redemptions: Option<u32>,
    #[serde(default)]
    max_redemptions_per_customer: Option<u32>,
    #[serde(default)]
    eligibility: Option<Eligibility>,
}

impl CouponFixture {
    fn into_new_coupon(self, now: Timestamp) -> Result<NewCoupon, FixtureError> {
        let lifetime = SignedDuration::from_hours(i64::from(self.valid_for_days) * 24);

        let valid_until = now
            .checked_add(lifetime)
            .map_err(|source| FixtureError::Window {
                code: self.code.clone(),
                source,
            })?;

        Ok(NewCoupon {
            code: self.code,
            description: self.description,
            discount: self.discount,
            max_discount_amount: self.max_discount_amount,
            valid_from: now,
            valid_until,
            max_redemptions: self.max_redemptions,
            max_redemptions_per_customer: self.max_redemptions_per_customer,
            eligibility: self.eligibility,
        })
    }
}

/// The bundled demo coupons (`WELCOME100`, `GOLD10`, `FASHION5`), starting at `now`.
///
/// # Errors
///
/// Returns an error if the bundled YAML cannot be parsed.
pub fn demo_coupons(now: Timestamp) -> Result<Vec<NewCoupon>, FixtureError> {
    parse_coupons(DEMO_COUPONS_YAML, now)
}

/// Load coupons from a YAML fixture file, starting at `now`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_coupons(path: impl AsRef<Path>, now: Timestamp) -> Result<Vec<NewCoupon>, FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_coupons(&contents, now)
}

fn parse_coupons(yaml: &str, now: Timestamp) -> Result<Vec<NewCoupon>, FixtureError> {
    let fixture: CouponsFixture = serde_norway::from_str(yaml)?;

    fixture
        .coupons
        .into_iter()
        .map(|coupon| coupon.into_new_coupon(now))
        .collect()
}
