mod api;
mod cells;
mod dwd;
mod error;
pub mod normalize;
mod query;
mod resolver;
mod utils;

#[cfg(test)]
mod test_support;

pub use dwd::*;
pub use error::DwdError;

pub use api::cell_data::FetchState;
pub use api::forecast::CellForecast;
pub use api::warnings::WeatherWarnings;

pub use cells::{list_cells, CellInfo};

pub use query::error::WfsError;
pub use query::geoserver::*;
pub use query::region_query::*;

pub use resolver::error::ResolveError;
pub use resolver::identifier::{Identifier, LatLon};
pub use resolver::layers::{Domain, RegionLayer};
pub use resolver::resolve::{region_filter, resolve, ResolvedCell};

pub use normalize::error::NormalizeError;
pub use normalize::forecast::{
    parse_forecast_collection, ForecastRecord, ForecastReport, ForecastSeries,
};
pub use normalize::warning::{parse_warning_collection, Urgency, WarningRecord, WarningReport};
