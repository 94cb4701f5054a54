//! Coupon Codes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coupons::InvalidCouponError;

/// Longest accepted code, in characters.
pub const MAX_CODE_LEN: usize = 64;

/// A normalised coupon code.
///
/// Codes are trimmed and upper-cased on construction, so `" save10 "` and
/// `"SAVE10"` refer to the same coupon. Only ASCII letters, digits, `-` and `_`
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Normalise and validate a raw code.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCouponError::EmptyCode`] when nothing is left after
    /// trimming, and [`InvalidCouponError::MalformedCode`] when the code is too
    /// long or contains characters outside `A-Z0-9-_`.
    pub fn parse(raw: &str) -> Result<Self, InvalidCouponError> {
        let normalised = raw.trim().to_ascii_uppercase();

        if normalised.is_empty() {
            return Err(InvalidCouponError::EmptyCode);
        }

        let well_formed = normalised.len() <= MAX_CODE_LEN
            && normalised
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !well_formed {
            return Err(InvalidCouponError::MalformedCode(normalised));
        }

        Ok(Self(normalised))
    }

    /// Returns the normalised code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CouponCode {
    type Error = InvalidCouponError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CouponCode> for String {
    fn from(code: CouponCode) -> Self {
        code.0
    }
}
