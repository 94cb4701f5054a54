//! Depot helper extensions.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::state::State;

pub(crate) trait DepotExt {
    /// The injected [`State`], or a 500 when the router was built without it.
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError>;
}

impl DepotExt for Depot {
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain::<Arc<State>>().map_err(|_missing| {
            error!("handler state was not injected");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_state_is_a_server_error() {
        let depot = Depot::new();

        assert_eq!(
            depot.state_or_500().err().map(|error| error.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }
}
