//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Replace identifiers in `path` with placeholders so routes group together.
///
/// Any segment directly under `/coupons` other than `best` is a coupon code.
fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");
    let mut previous = "";

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if index == 1 && previous == "coupons" && segment != "best" {
            normalised.push_str("{code}");
        } else if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupon_codes_are_replaced() {
        let names = request_span_name("POST", "/coupons/SAVE10/redeem");

        assert_eq!(names.otel_path, "/coupons/{code}/redeem");
        assert_eq!(names.otel_span_name, "POST /coupons/{code}/redeem");
    }

    #[test]
    fn static_routes_are_kept() {
        assert_eq!(normalise_path_for_span_name("/coupons"), "/coupons");
        assert_eq!(normalise_path_for_span_name("/coupons/best"), "/coupons/best");
        assert_eq!(normalise_path_for_span_name("/healthcheck"), "/healthcheck");
        assert_eq!(normalise_path_for_span_name("/"), "/");
    }

    #[test]
    fn uuids_are_replaced() {
        assert_eq!(
            normalise_path_for_span_name("/things/0195f9d4-7d3f-7c4e-9a0b-1f2e3d4c5b6a"),
            "/things/{uuid}"
        );
    }
}
