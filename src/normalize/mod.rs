//! Turns raw geoserver feature collections into typed reports.

pub(crate) mod collection;
pub mod convert;
pub mod error;
pub mod forecast;
pub mod into_utc;
pub mod warning;
