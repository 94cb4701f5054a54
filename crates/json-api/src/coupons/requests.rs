//! Coupon request bodies.

use std::num::NonZeroU32;

use coupons::{
    checkout::{Cart, CartItem, Customer},
    coupons::{Discount, DiscountKind, NewCoupon},
    eligibility::Eligibility,
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};

use crate::extensions::*;

/// How a discount value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DiscountKindBody {
    /// Percentage of the cart total, from 0 to 100.
    Percentage,

    /// Amount in minor currency units.
    FixedAmount,
}

impl From<DiscountKindBody> for DiscountKind {
    fn from(kind: DiscountKindBody) -> Self {
        match kind {
            DiscountKindBody::Percentage => DiscountKind::Percentage,
            DiscountKindBody::FixedAmount => DiscountKind::FixedAmount,
        }
    }
}

impl From<DiscountKind> for DiscountKindBody {
    fn from(kind: DiscountKind) -> Self {
        match kind {
            DiscountKind::Percentage => DiscountKindBody::Percentage,
            DiscountKind::FixedAmount => DiscountKindBody::FixedAmount,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct DiscountRequest {
    /// How `value` is interpreted
    pub kind: DiscountKindBody,

    /// Percentage or amount in minor units; must not be negative. Accepts a
    /// JSON number or a decimal string.
    #[salvo(schema(value_type = String))]
    pub value: Decimal,
}

/// Customer and cart rules. Omitted rules always pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct EligibilityBody {
    pub allowed_tiers: Vec<String>,
    pub min_lifetime_spend: Option<u64>,
    pub min_orders_placed: Option<u32>,
    pub first_order_only: bool,
    pub allowed_countries: Vec<String>,
    pub min_cart_value: Option<u64>,
    pub applicable_categories: Vec<String>,
    pub excluded_categories: Vec<String>,
    pub min_items_count: Option<u32>,
}

impl From<EligibilityBody> for Eligibility {
    fn from(body: EligibilityBody) -> Self {
        Eligibility {
            allowed_tiers: body.allowed_tiers,
            min_lifetime_spend: body.min_lifetime_spend,
            min_orders_placed: body.min_orders_placed,
            first_order_only: body.first_order_only,
            allowed_countries: body.allowed_countries,
            min_cart_value: body.min_cart_value,
            applicable_categories: body.applicable_categories,
            excluded_categories: body.excluded_categories,
            min_items_count: body.min_items_count,
        }
    }
}

impl From<Eligibility> for EligibilityBody {
    fn from(rules: Eligibility) -> Self {
        EligibilityBody {
            allowed_tiers: rules.allowed_tiers,
            min_lifetime_spend: rules.min_lifetime_spend,
            min_orders_placed: rules.min_orders_placed,
            first_order_only: rules.first_order_only,
            allowed_countries: rules.allowed_countries,
            min_cart_value: rules.min_cart_value,
            applicable_categories: rules.applicable_categories,
            excluded_categories: rules.excluded_categories,
            min_items_count: rules.min_items_count,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateCouponRequest {
    /// Coupon code; normalised to upper case
    pub code: String,

    /// Free text description
    #[serde(default)]
    pub description: String,

    /// Discount terms
    pub discount: DiscountRequest,

    /// Cap on percentage discounts, in minor units
    pub max_discount_amount: Option<u64>,

    /// Start of the validity window, RFC 3339
    pub valid_from: String,

    /// End of the validity window, RFC 3339
    pub valid_until: String,

    /// Number of times the coupon may be redeemed, defaults to 1
    pub max_redemptions: Option<u32>,

    /// Number of times one customer may redeem the coupon; redeeming then
    /// requires a customer
    pub max_redemptions_per_customer: Option<u32>,

    /// Customer and cart rules
    pub eligibility: Option<EligibilityBody>,
}

impl CreateCouponRequest {
    /// Parse the wire representation; coupon rules are checked by the service.
    pub(crate) fn into_new_coupon(self) -> Result<NewCoupon, StatusError> {
        let valid_from = self
            .valid_from
            .parse::<Timestamp>()
            .or_400("could not parse \"valid_from\"")?;

        let valid_until = self
            .valid_until
            .parse::<Timestamp>()
            .or_400("could not parse \"valid_until\"")?;

        Ok(NewCoupon {
            code: self.code,
            description: self.description,
            discount: Discount {
                kind: self.discount.kind.into(),
                value: self.discount.value,
            },
            max_discount_amount: self.max_discount_amount,
            valid_from,
            valid_until,
            max_redemptions: self.max_redemptions,
            max_redemptions_per_customer: self.max_redemptions_per_customer,
            eligibility: self.eligibility.map(Eligibility::from),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CustomerBody {
    /// Opaque customer identifier
    pub id: String,

    pub tier: Option<String>,
    pub country: Option<String>,

    /// Total spent across previous orders, in minor units
    #[serde(default)]
    pub lifetime_spend: u64,

    #[serde(default)]
    pub orders_placed: u32,
}

impl From<CustomerBody> for Customer {
    fn from(body: CustomerBody) -> Self {
        Customer {
            id: body.id,
            tier: body.tier,
            country: body.country,
            lifetime_spend: body.lifetime_spend,
            orders_placed: body.orders_placed,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CartItemBody {
    pub product_id: String,
    pub category: String,

    /// Price of one unit, in minor units
    pub unit_price: u64,

    /// Units in the cart, at least 1
    pub quantity: u32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct CartBody {
    #[serde(default)]
    pub items: Vec<CartItemBody>,
}

impl CartBody {
    pub(crate) fn into_cart(self) -> Result<Cart, StatusError> {
        let items = self
            .items
            .into_iter()
            .map(|item| {
                let quantity = NonZeroU32::new(item.quantity)
                    .ok_or_else(|| StatusError::bad_request().brief("cart item quantity must be at least 1"))?;

                Ok(CartItem {
                    product_id: item.product_id,
                    category: item.category,
                    unit_price: item.unit_price,
                    quantity,
                })
            })
            .collect::<Result<Vec<_>, StatusError>>()?;

        Ok(Cart::new(items))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct RedeemCouponRequest {
    /// Who is redeeming, such as an order id
    pub redeemer_id: String,

    /// Required when the coupon has eligibility rules
    pub customer: Option<CustomerBody>,

    /// Required when the coupon has eligibility rules; enables the discount amount in the response
    pub cart: Option<CartBody>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct BestCouponRequest {
    pub customer: CustomerBody,
    pub cart: CartBody,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn create_request_parses_terms() -> TestResult {
        let request: CreateCouponRequest = serde_json::from_value(json!({
            "code": "save10",
            "discount": { "kind": "percentage", "value": 12.5 },
            "valid_from": "2024-01-01T00:00:00Z",
            "valid_until": "2024-12-31T23:59:59Z",
            "eligibility": { "allowed_tiers": ["GOLD"] }
        }))?;

        let coupon = request.into_new_coupon()?;

        assert_eq!(coupon.code, "save10");
        assert_eq!(coupon.discount, Discount::percentage(Decimal::new(125, 1)));
        assert_eq!(coupon.max_redemptions, None);
        assert_eq!(
            coupon.eligibility.map(|rules| rules.allowed_tiers),
            Some(vec!["GOLD".to_string()])
        );

        Ok(())
    }

    #[test]
    fn discount_values_keep_their_decimal_digits() -> TestResult {
        let request: CreateCouponRequest = serde_json::from_value(json!({
            "code": "THIRD",
            "discount": { "kind": "percentage", "value": "33.3333" },
            "valid_from": "2024-01-01T00:00:00Z",
            "valid_until": "2024-12-31T23:59:59Z",
            "max_redemptions_per_customer": 2
        }))?;

        let coupon = request.into_new_coupon()?;

        assert_eq!(coupon.discount.value, Decimal::new(333_333, 4));
        assert_eq!(coupon.max_redemptions_per_customer, Some(2));

        Ok(())
    }

    #[test]
    fn non_numeric_discount_values_are_rejected() {
        let request = serde_json::from_value::<CreateCouponRequest>(json!({
            "code": "BAD",
            "discount": { "kind": "percentage", "value": "ten" },
            "valid_from": "2024-01-01T00:00:00Z",
            "valid_until": "2024-12-31T23:59:59Z"
        }));

        assert!(request.is_err(), "expected a non-numeric value to be rejected");
    }

    #[test]
    fn negative_values_are_passed_through_for_validation() -> TestResult {
        let request: CreateCouponRequest = serde_json::from_value(json!({
            "code": "MINUS5",
            "discount": { "kind": "fixed_amount", "value": -5 },
            "valid_from": "2024-01-01T00:00:00Z",
            "valid_until": "2024-12-31T23:59:59Z"
        }))?;

        assert_eq!(request.into_new_coupon()?.discount, Discount::fixed_amount(-5));

        Ok(())
    }

    #[test]
    fn unparseable_timestamps_are_bad_requests() -> TestResult {
        let request: CreateCouponRequest = serde_json::from_value(json!({
            "code": "SAVE10",
            "discount": { "kind": "percentage", "value": 10 },
            "valid_from": "last tuesday",
            "valid_until": "2024-12-31T23:59:59Z"
        }))?;

        let error = request.into_new_coupon().err();

        assert_eq!(
            error.map(|error| error.brief),
            Some("could not parse \"valid_from\"".to_string())
        );

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() -> TestResult {
        let cart: CartBody = serde_json::from_value(json!({
            "items": [{ "product_id": "p1", "category": "shoes", "unit_price": 100, "quantity": 0 }]
        }))?;

        assert!(cart.into_cart().is_err(), "expected zero quantity to be rejected");

        Ok(())
    }

    #[test]
    fn cart_lines_are_converted() -> TestResult {
        let cart: CartBody = serde_json::from_value(json!({
            "items": [
                { "product_id": "p1", "category": "shoes", "unit_price": 2_500, "quantity": 2 },
                { "product_id": "p2", "category": "socks", "unit_price": 500, "quantity": 1 }
            ]
        }))?;

        assert_eq!(cart.into_cart()?.total(), 5_500);

        Ok(())
    }
}
