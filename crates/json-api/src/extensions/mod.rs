//! Handler helpers for the depot, query strings and results.

mod depot;
mod point_in_time;
mod result;

pub(crate) use self::{
    depot::DepotExt as _, point_in_time::PointInTimeExt as _, result::ResultExt as _,
};
