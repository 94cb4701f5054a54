//! Coupon registry, redemption guard and their storage backends.

pub mod context;
pub mod database;
pub mod domain;
pub mod store;

#[cfg(test)]
mod test;
