//! Per-request span, access log and HTTP metrics.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

/// Probes are scraped often and would drown out real traffic.
const UNTRACED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let path = req.uri().path().to_owned();

    if UNTRACED_PATHS.contains(&path.as_str()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let _in_flight = metrics::InFlightRequestGuard::track();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let route = spans::request_span_name(&method, &path);

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %route.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::parent_propagation_enabled()
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let completed = Completed {
        status: request_ids::response_status_or_ok(res.status_code),
        elapsed: started.elapsed(),
    };

    metrics::observe_request(
        &method,
        &route.otel_path,
        completed.status.as_u16(),
        completed.elapsed.as_secs_f64(),
    );

    span.record("status", completed.status.as_u16());
    span.record("duration_ms", completed.elapsed.as_millis());

    span.in_scope(|| completed.log());
}

#[derive(Debug, Clone, Copy)]
struct Completed {
    status: StatusCode,
    elapsed: Duration,
}

impl Completed {
    fn log(self) {
        let status = self.status.as_u16();
        let duration_ms = self.elapsed.as_millis();

        if self.status.is_server_error() {
            error!(status, duration_ms, "request.failed");
        } else if self.status.is_client_error() {
            warn!(status, duration_ms, "request.rejected");
        } else {
            info!(status, duration_ms, "request.completed");
        }

        let threshold_ms = u128::from(settings::slow_request_threshold_ms());

        if duration_ms > threshold_ms {
            warn!(duration_ms, threshold_ms, "request.slow");
        }
    }
}
