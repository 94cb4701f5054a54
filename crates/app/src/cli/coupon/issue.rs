use clap::{Args, ValueEnum};
use coupons::coupons::{Discount, NewCoupon};
use coupons_app::context::AppContext;
use jiff::Timestamp;
use rust_decimal::Decimal;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DiscountKindArg {
    Percentage,
    FixedAmount,
}

#[derive(Debug, Args)]
pub(crate) struct IssueCouponArgs {
    /// Coupon code; normalised to upper case
    #[arg(long)]
    code: String,

    /// Discount kind
    #[arg(long, value_enum)]
    kind: DiscountKindArg,

    /// Percentage (0-100) or fixed amount in minor units
    #[arg(long, allow_negative_numbers = true)]
    value: Decimal,

    /// Cap on percentage discounts, in minor units
    #[arg(long)]
    max_discount: Option<u64>,

    /// Start of the validity window (RFC 3339)
    #[arg(long)]
    valid_from: Timestamp,

    /// End of the validity window (RFC 3339)
    #[arg(long)]
    valid_until: Timestamp,

    /// Number of times the coupon may be redeemed
    #[arg(long)]
    max_redemptions: Option<u32>,

    /// Number of times one customer may redeem the coupon
    #[arg(long)]
    max_redemptions_per_customer: Option<u32>,

    /// Free text description
    #[arg(long, default_value = "")]
    description: String,
}

pub(crate) async fn run(args: IssueCouponArgs, context: &AppContext) -> Result<(), String> {
    let discount = match args.kind {
        DiscountKindArg::Percentage => Discount::percentage(args.value),
        DiscountKindArg::FixedAmount => Discount::fixed_amount(args.value),
    };

    let coupon = NewCoupon {
        description: args.description,
        max_discount_amount: args.max_discount,
        max_redemptions: args.max_redemptions,
        max_redemptions_per_customer: args.max_redemptions_per_customer,
        ..NewCoupon::new(args.code, discount, args.valid_from, args.valid_until)
    };

    let coupon = context
        .coupons
        .issue_coupon(coupon, Timestamp::now())
        .await
        .map_err(|error| format!("failed to issue coupon: {error}"))?;

    super::print_coupon(&coupon);

    Ok(())
}
