//! Provides [`WeatherWarnings`], the current weather warnings of one warncell.

use crate::api::cell_data::{CellData, FetchState};
use crate::normalize::warning::{parse_warning_collection, WarningRecord, WarningReport};
use crate::query::geoserver::{FeatureSource, GeoserverClient};
use crate::resolver::identifier::Identifier;
use crate::resolver::layers::Domain;
use chrono::{DateTime, Utc};
use std::fmt;

/// Weather warnings issued by DWD for one warncell.
///
/// The warncell is resolved once on construction, from a warncell id, a warncell
/// name or a GPS location. Every [`update`](WeatherWarnings::update) fetches the
/// warnings for that warncell again.
///
/// Failures never surface as errors: check [`is_valid`](WeatherWarnings::is_valid)
/// first, every other accessor returns `None` while the data is not valid.
///
/// # Examples
///
/// ```no_run
/// # use dwd_wfs::{DwdClient, DwdError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), DwdError> {
/// let client = DwdClient::new()?;
/// let warnings = client.weather_warnings(808436003).await;
///
/// if warnings.is_valid() {
///     println!("{}", warnings);
///     for warning in warnings.current_warnings().unwrap_or_default() {
///         println!("{:?}: {:?}", warning.level, warning.headline);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct WeatherWarnings<S = GeoserverClient> {
    data: CellData<S, WarningReport>,
}

impl<S: FeatureSource> WeatherWarnings<S> {
    /// Resolves `identifier` to a warncell and fetches its warnings.
    ///
    /// Warncells are searched in municipalities, counties, inland lakes, coast and
    /// sea areas, in that order. A location matches the warncell whose area contains it.
    pub async fn new(source: S, identifier: impl Into<Identifier>) -> Self {
        Self {
            data: CellData::resolve(
                source,
                Domain::WeatherWarnings,
                identifier.into(),
                parse_warning_collection,
            )
            .await,
        }
    }

    /// Fetches the warnings of the resolved warncell again.
    ///
    /// Does nothing when construction could not resolve a warncell.
    pub async fn update(&mut self) {
        self.data.update(parse_warning_collection).await;
    }

    pub fn is_valid(&self) -> bool {
        self.data.is_valid()
    }

    pub fn state(&self) -> FetchState {
        self.data.state()
    }

    pub fn warncell_id(&self) -> Option<i64> {
        self.data.cell().map(|c| c.id())
    }

    /// Name of the warncell, suffixed with `" (not unique use ID!)"` when the name
    /// used for construction matched several warncells.
    pub fn warncell_name(&self) -> Option<&str> {
        self.data.cell().map(|c| c.name())
    }

    /// UTC timestamp of the last successful update.
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.data.report().map(|r| r.last_update)
    }

    /// Highest level (0-4) of the warnings in effect.
    pub fn current_warning_level(&self) -> Option<u8> {
        self.data.report().map(|r| r.current_warning_level)
    }

    pub fn current_warnings(&self) -> Option<&[WarningRecord]> {
        self.data.report().map(|r| r.current_warnings.as_slice())
    }

    /// Highest level (0-4) of the warnings announced for later.
    pub fn expected_warning_level(&self) -> Option<u8> {
        self.data.report().map(|r| r.expected_warning_level)
    }

    pub fn expected_warnings(&self) -> Option<&[WarningRecord]> {
        self.data.report().map(|r| r.expected_warnings.as_slice())
    }

    pub fn report(&self) -> Option<&WarningReport> {
        self.data.report()
    }

    /// Number of current and expected warnings, 0 without valid data.
    pub fn len(&self) -> usize {
        self.data.report().map_or(0, WarningReport::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: FeatureSource> fmt::Display for WeatherWarnings<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.data.report(), self.warncell_name()) {
            (Some(report), Some(name)) => write!(
                f,
                "{} current and {} expected warnings issued by DWD for '{}'",
                report.current_warnings.len(),
                report.expected_warnings.len(),
                name
            ),
            _ => write!(f, "No valid data available"),
        }
    }
}
