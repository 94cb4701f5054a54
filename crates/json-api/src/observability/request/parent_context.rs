//! W3C `traceparent` extraction.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::{HeaderMap, HeaderName};

/// The remote span context carried by `headers`, if there is a valid one.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| remote_context(propagator, headers))
}

fn remote_context(propagator: &dyn TextMapPropagator, headers: &HeaderMap) -> Option<Context> {
    // Start from an empty context so a request without headers never joins
    // whatever span happens to be active in this task.
    let context = propagator.extract_with_context(&Context::new(), &Headers(headers));

    let valid = context.span().span_context().is_valid();

    valid.then_some(context)
}

struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
