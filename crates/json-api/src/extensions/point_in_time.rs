//! `at` query parameter.

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait PointInTimeExt {
    /// The RFC 3339 timestamp in `?at=`, or now when it is absent.
    fn into_point_in_time(self) -> Result<Timestamp, StatusError>;
}

impl PointInTimeExt for QueryParam<String, false> {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError> {
        let Some(raw) = self.into_inner() else {
            return Ok(Timestamp::now());
        };

        raw.trim()
            .parse()
            .or_400("\"at\" must be an RFC 3339 timestamp")
    }
}
