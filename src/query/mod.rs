pub mod error;
pub mod geoserver;
pub mod region_query;
