//! Provides [`CellForecast`], the pollen flight or bioweather forecast of one region.

use crate::api::cell_data::{CellData, FetchState};
use crate::normalize::error::NormalizeError;
use crate::normalize::forecast::{parse_forecast_collection, ForecastReport, ForecastSeries};
use crate::query::geoserver::{FeatureSource, GeoserverClient};
use crate::resolver::identifier::Identifier;
use crate::resolver::layers::Domain;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Forecast data published by DWD for one pollen flight or bioweather region.
///
/// Create one with [`CellForecast::pollen_flight`] or [`CellForecast::bioweather`]
/// (or the matching [`crate::DwdClient`] methods). Regions are resolved from their
/// numeric cell id or their name; pollen flight names match as substrings,
/// bioweather names must match exactly.
///
/// As with [`crate::WeatherWarnings`], failures only show as
/// [`is_valid`](CellForecast::is_valid) returning `false`.
pub struct CellForecast<S = GeoserverClient> {
    domain: Domain,
    data: CellData<S, ForecastReport>,
}

impl<S: FeatureSource> CellForecast<S> {
    /// Resolves `identifier` to a pollen flight region and fetches its forecast.
    pub async fn pollen_flight(source: S, identifier: impl Into<Identifier>) -> Self {
        Self::new(source, Domain::PollenFlight, identifier.into()).await
    }

    /// Resolves `identifier` to a bioweather region and fetches its forecast.
    pub async fn bioweather(source: S, identifier: impl Into<Identifier>) -> Self {
        Self::new(source, Domain::BioWeather, identifier.into()).await
    }

    async fn new(source: S, domain: Domain, identifier: Identifier) -> Self {
        let data = CellData::resolve(source, domain, identifier, parser(domain)).await;
        Self { domain, data }
    }

    /// Fetches the forecast of the resolved region again.
    ///
    /// Does nothing when construction could not resolve a region.
    pub async fn update(&mut self) {
        self.data.update(parser(self.domain)).await;
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn is_valid(&self) -> bool {
        self.data.is_valid()
    }

    pub fn state(&self) -> FetchState {
        self.data.state()
    }

    pub fn cell_id(&self) -> Option<i64> {
        self.data.cell().map(|c| c.id())
    }

    /// Name of the region, suffixed with `" (not unique use ID!)"` when the name
    /// used for construction matched several regions.
    pub fn cell_name(&self) -> Option<&str> {
        self.data.cell().map(|c| c.name())
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.data.report().map(|r| r.last_update)
    }

    /// Forecast series keyed by forecast type.
    pub fn forecast_data(&self) -> Option<&BTreeMap<i64, ForecastSeries>> {
        self.data.report().map(|r| &r.forecast_data)
    }

    pub fn report(&self) -> Option<&ForecastReport> {
        self.data.report()
    }

    /// Highest impact level over all forecast types.
    pub fn highest_level(&self) -> Option<i64> {
        self.data.report().map(ForecastReport::highest_level)
    }

    /// Number of forecast records over all types, 0 without valid data.
    pub fn len(&self) -> usize {
        self.data.report().map_or(0, ForecastReport::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parser(domain: Domain) -> impl Fn(&Value) -> Result<ForecastReport, NormalizeError> {
    let level_field = domain.forecast_level_field().unwrap_or("POLLENINT");
    move |collection| parse_forecast_collection(collection, level_field)
}

impl<S: FeatureSource> fmt::Display for CellForecast<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.highest_level() {
            Some(level) => write!(f, "Highest forecasted impact level: {}", level),
            None => write!(f, "No valid data available"),
        }
    }
}
