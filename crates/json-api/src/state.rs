//! Shared handler state.

use std::sync::Arc;

use coupons_app::{context::AppContext, domain::coupons::CouponsService};

/// Injected once at startup and read by every handler through the depot.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) coupons: Arc<dyn CouponsService>,
}

impl State {
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self {
            coupons: app.coupons,
        })
    }
}
