//! Prometheus metrics and the `/metrics` endpoint.
//!
//! Metrics live in a private registry built on first use. If it cannot be
//! built, recording is a no-op and `/metrics` answers 500.

use std::sync::OnceLock;

use coupons_app::domain::coupons::CouponsServiceError;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    redemptions_total: IntCounterVec,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| {
            Metrics::build()
                .inspect_err(|source| error!("failed to build metrics registry: {source}"))
                .ok()
        })
        .as_ref()
}

impl Metrics {
    fn build() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "coupons_json_http_requests_total",
                    "HTTP requests by method, route and status.",
                ),
                &["method", "route", "status_class", "status_code"],
            )?,
        )?;

        let request_duration_seconds = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::new(
                    "coupons_json_http_request_duration_seconds",
                    "HTTP request duration in seconds by method and route.",
                )
                .buckets(DURATION_BUCKETS.to_vec()),
                &["method", "route"],
            )?,
        )?;

        let requests_in_flight = register(
            &registry,
            IntGauge::new(
                "coupons_json_http_requests_in_flight",
                "HTTP requests currently being served.",
            )?,
        )?;

        let redemptions_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "coupons_json_redemptions_total",
                    "Redemption attempts by outcome.",
                ),
                &["outcome"],
            )?,
        )?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
            redemptions_total,
        })
    }
}

fn register<C>(registry: &Registry, collector: C) -> Result<C, prometheus::Error>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;

    Ok(collector)
}

/// Holds the in-flight gauge up for as long as it lives.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static Metrics>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let metrics = metrics();

        if let Some(metrics) = metrics {
            metrics.requests_in_flight.inc();
        }

        Self(metrics)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(metrics) = self.0 {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a redemption attempt by how it ended.
pub(crate) fn observe_redemption<T>(result: &Result<T, CouponsServiceError>) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .redemptions_total
        .with_label_values(&[redemption_outcome(result)])
        .inc();
}

fn redemption_outcome<T>(result: &Result<T, CouponsServiceError>) -> &'static str {
    match result {
        Ok(_) => "redeemed",
        Err(CouponsServiceError::AlreadyRedeemed) => "already_redeemed",
        Err(CouponsServiceError::CustomerLimitReached) => "customer_limit_reached",
        Err(CouponsServiceError::Expired) => "expired",
        Err(CouponsServiceError::NotEligible(_)) => "not_eligible",
        Err(CouponsServiceError::NotFound) => "not_found",
        Err(CouponsServiceError::InvalidInput(_) | CouponsServiceError::EmptyRedeemer) => {
            "invalid"
        }
        Err(CouponsServiceError::Store(_) | CouponsServiceError::Fixture(_)) => "error",
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(String::from_utf8_lossy(&encoded).into_owned());
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
