//! Checkout Context
//!
//! The customer and cart a coupon is being applied to. Amounts are in minor
//! currency units.

use std::num::NonZeroU32;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// The customer redeeming or shopping with a coupon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Opaque customer identifier.
    pub id: String,

    /// Loyalty tier, such as `GOLD`.
    #[serde(default)]
    pub tier: Option<String>,

    /// ISO country code.
    #[serde(default)]
    pub country: Option<String>,

    /// Total spent across previous orders.
    #[serde(default)]
    pub lifetime_spend: u64,

    /// Number of previous orders.
    #[serde(default)]
    pub orders_placed: u32,
}

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier.
    pub product_id: String,

    /// Product category used by eligibility rules.
    pub category: String,

    /// Price of one unit.
    pub unit_price: u64,

    /// Units in the cart.
    pub quantity: NonZeroU32,
}

impl CartItem {
    /// Price of the whole line.
    pub fn line_total(&self) -> u64 {
        self.unit_price
            .saturating_mul(u64::from(self.quantity.get()))
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a cart from its lines.
    pub fn new(items: impl IntoIterator<Item = CartItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Sum of all line totals.
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |total, item| total.saturating_add(item.line_total()))
    }

    /// Number of units across all lines.
    pub fn items_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Distinct categories present in the cart.
    pub fn categories(&self) -> FxHashSet<&str> {
        self.items.iter().map(|item| item.category.as_str()).collect()
    }
}
