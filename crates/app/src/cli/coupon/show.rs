use clap::Args;
use coupons_app::context::AppContext;
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct ShowCouponArgs {
    /// Coupon code
    code: String,

    /// Point in time to evaluate validity at (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<Timestamp>,
}

pub(crate) async fn run(args: ShowCouponArgs, context: &AppContext) -> Result<(), String> {
    let details = context
        .coupons
        .get_coupon(args.code, args.at.unwrap_or_else(Timestamp::now))
        .await
        .map_err(|error| format!("failed to show coupon: {error}"))?;

    super::print_coupon(&details.coupon);

    println!("currently_valid: {}", details.currently_valid);
    println!("remaining_redemptions: {}", details.remaining_redemptions);

    for record in &details.redemptions {
        println!(
            "redemption {}: {} at {}",
            record.slot, record.redeemer_id, record.redeemed_at
        );
    }

    Ok(())
}
