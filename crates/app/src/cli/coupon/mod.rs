use clap::{Args, Subcommand};
use coupons::coupons::Coupon;
use coupons_app::context::AppContext;

mod issue;
mod list;
mod redeem;
mod show;

#[derive(Debug, Args)]
pub(crate) struct CouponCommand {
    #[command(subcommand)]
    command: CouponSubcommand,
}

#[derive(Debug, Subcommand)]
enum CouponSubcommand {
    Issue(issue::IssueCouponArgs),
    Show(show::ShowCouponArgs),
    List,
    Redeem(redeem::RedeemCouponArgs),
}

pub(crate) async fn run(command: CouponCommand, context: &AppContext) -> Result<(), String> {
    match command.command {
        CouponSubcommand::Issue(args) => issue::run(args, context).await,
        CouponSubcommand::Show(args) => show::run(args, context).await,
        CouponSubcommand::List => list::run(context).await,
        CouponSubcommand::Redeem(args) => redeem::run(args, context).await,
    }
}

fn print_coupon(coupon: &Coupon) {
    println!("code: {}", coupon.code);
    println!("uuid: {}", coupon.uuid);

    if !coupon.description.is_empty() {
        println!("description: {}", coupon.description);
    }

    println!(
        "discount: {} {}",
        coupon.discount.kind.to_str(),
        coupon.discount.value
    );

    if let Some(cap) = coupon.max_discount_amount {
        println!("max_discount_amount: {cap}");
    }

    println!("valid_from: {}", coupon.valid_from);
    println!("valid_until: {}", coupon.valid_until);
    println!("max_redemptions: {}", coupon.max_redemptions);
}
