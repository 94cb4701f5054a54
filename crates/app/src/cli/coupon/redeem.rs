use clap::Args;
use coupons::checkout::Customer;
use coupons_app::{context::AppContext, domain::coupons::models::RedeemCoupon};
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct RedeemCouponArgs {
    /// Coupon code
    code: String,

    /// Opaque redeemer identifier, such as an order id
    #[arg(long)]
    redeemer: String,

    /// Customer redeeming the coupon; required by per-customer limits
    #[arg(long)]
    customer: Option<String>,
}

pub(crate) async fn run(args: RedeemCouponArgs, context: &AppContext) -> Result<(), String> {
    let redemption = RedeemCoupon {
        customer: args.customer.map(|id| Customer {
            id,
            ..Customer::default()
        }),
        ..RedeemCoupon::new(args.redeemer)
    };

    let redemption = context
        .coupons
        .redeem_coupon(args.code, redemption, Timestamp::now())
        .await
        .map_err(|error| format!("failed to redeem coupon: {error}"))?;

    println!("code: {}", redemption.record.code);
    println!("redeemer_id: {}", redemption.record.redeemer_id);
    println!("redeemed_at: {}", redemption.record.redeemed_at);
    println!("slot: {}", redemption.record.slot);

    Ok(())
}
