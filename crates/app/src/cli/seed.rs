use coupons_app::context::AppContext;
use jiff::Timestamp;

pub(crate) async fn run(context: &AppContext) -> Result<(), String> {
    let seeded = context
        .coupons
        .seed_demo_coupons(Timestamp::now())
        .await
        .map_err(|error| format!("failed to seed demo coupons: {error}"))?;

    if seeded.is_empty() {
        println!("demo coupons already present");
    }

    for coupon in seeded {
        println!("seeded: {} (valid until {})", coupon.code, coupon.valid_until);
    }

    Ok(())
}
