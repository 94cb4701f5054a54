//! Eligibility Rules

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkout::{Cart, Customer};

/// Why a customer or cart does not qualify for a coupon.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IneligibleReason {
    /// The coupon has rules but no customer or cart was supplied.
    #[error("customer and cart are required to evaluate this coupon")]
    ContextRequired,

    /// The coupon limits redemptions per customer but no customer was supplied.
    #[error("a customer is required to redeem this coupon")]
    CustomerRequired,

    /// Customer tier is not in the allowed list.
    #[error("customer tier is not eligible")]
    Tier,

    /// Customer has not spent enough historically.
    #[error("lifetime spend must be at least {required}")]
    LifetimeSpend {
        /// Minimum lifetime spend.
        required: u64,
    },

    /// Customer has not placed enough orders.
    #[error("at least {required} previous orders are required")]
    OrdersPlaced {
        /// Minimum number of orders.
        required: u32,
    },

    /// Coupon is restricted to a customer's first order.
    #[error("coupon is only valid on a first order")]
    FirstOrderOnly,

    /// Customer country is not in the allowed list.
    #[error("customer country is not eligible")]
    Country,

    /// Cart total is below the minimum.
    #[error("cart value must be at least {required}")]
    CartValue {
        /// Minimum cart total.
        required: u64,
    },

    /// None of the cart categories are covered by the coupon.
    #[error("cart contains no applicable category")]
    NoApplicableCategory,

    /// The cart contains a category the coupon excludes.
    #[error("cart contains excluded category {0}")]
    ExcludedCategory(String),

    /// The cart holds too few units.
    #[error("cart must contain at least {required} items")]
    ItemsCount {
        /// Minimum number of units.
        required: u32,
    },

    /// The coupon would not reduce the cart total.
    #[error("coupon yields no discount for this cart")]
    NoDiscount,
}

/// Customer and cart rules attached to a coupon. Unset rules always pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Eligibility {
    /// Customer tiers that may use the coupon.
    pub allowed_tiers: Vec<String>,

    /// Minimum customer lifetime spend.
    pub min_lifetime_spend: Option<u64>,

    /// Minimum number of previous orders.
    pub min_orders_placed: Option<u32>,

    /// Only customers without previous orders qualify.
    pub first_order_only: bool,

    /// Customer countries that may use the coupon.
    pub allowed_countries: Vec<String>,

    /// Minimum cart total.
    pub min_cart_value: Option<u64>,

    /// The cart must contain at least one of these categories.
    pub applicable_categories: Vec<String>,

    /// The cart must contain none of these categories.
    pub excluded_categories: Vec<String>,

    /// Minimum number of units in the cart.
    pub min_items_count: Option<u32>,
}

impl Eligibility {
    /// Check every rule, returning the first that fails.
    ///
    /// # Errors
    ///
    /// Returns the [`IneligibleReason`] of the first failing rule, customer rules
    /// before cart rules.
    pub fn check(&self, customer: &Customer, cart: &Cart) -> Result<(), IneligibleReason> {
        self.check_customer(customer)?;
        self.check_cart(cart)
    }

    fn check_customer(&self, customer: &Customer) -> Result<(), IneligibleReason> {
        if !self.allowed_tiers.is_empty() && !contains(&self.allowed_tiers, customer.tier.as_deref())
        {
            return Err(IneligibleReason::Tier);
        }

        if let Some(required) = self.min_lifetime_spend
            && customer.lifetime_spend < required
        {
            return Err(IneligibleReason::LifetimeSpend { required });
        }

        if let Some(required) = self.min_orders_placed
            && customer.orders_placed < required
        {
            return Err(IneligibleReason::OrdersPlaced { required });
        }

        if self.first_order_only && customer.orders_placed != 0 {
            return Err(IneligibleReason::FirstOrderOnly);
        }

        if !self.allowed_countries.is_empty()
            && !contains(&self.allowed_countries, customer.country.as_deref())
        {
            return Err(IneligibleReason::Country);
        }

        Ok(())
    }

    fn check_cart(&self, cart: &Cart) -> Result<(), IneligibleReason> {
        if let Some(required) = self.min_cart_value
            && cart.total() < required
        {
            return Err(IneligibleReason::CartValue { required });
        }

        let categories = cart.categories();

        if !self.applicable_categories.is_empty()
            && !self
                .applicable_categories
                .iter()
                .any(|category| categories.contains(category.as_str()))
        {
            return Err(IneligibleReason::NoApplicableCategory);
        }

        if let Some(excluded) = self
            .excluded_categories
            .iter()
            .find(|category| categories.contains(category.as_str()))
        {
            return Err(IneligibleReason::ExcludedCategory(excluded.clone()));
        }

        if let Some(required) = self.min_items_count
            && cart.items_count() < u64::from(required)
        {
            return Err(IneligibleReason::ItemsCount { required });
        }

        Ok(())
    }
}

fn contains(allowed: &[String], value: Option<&str>) -> bool {
    value.is_some_and(|value| allowed.iter().any(|candidate| candidate == value))
}
