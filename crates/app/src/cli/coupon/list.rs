use coupons_app::context::AppContext;

pub(crate) async fn run(context: &AppContext) -> Result<(), String> {
    let coupons = context
        .coupons
        .list_coupons()
        .await
        .map_err(|error| format!("failed to list coupons: {error}"))?;

    if coupons.is_empty() {
        println!("no coupons found");
        return Ok(());
    }

    for coupon in coupons {
        super::print_coupon(&coupon);
        println!();
    }

    Ok(())
}
