//! This module provides the main entry point for talking to the DWD geoserver.
//! It hands out result objects for weather warnings, pollen flight and bioweather
//! forecasts, and lists the cells each of them can be resolved to.

use crate::api::forecast::CellForecast;
use crate::api::warnings::WeatherWarnings;
use crate::cells::{list_cells, CellInfo};
use crate::error::DwdError;
use crate::query::geoserver::{
    GeoserverClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
use crate::resolver::identifier::Identifier;
use crate::resolver::layers::Domain;
use crate::resolver::resolve::{resolve, ResolvedCell};
use bon::bon;
use std::time::Duration;

/// The main client for the DWD geoserver WFS API.
///
/// Holds the HTTP transport and its configuration. Cloning is cheap, every result
/// object it creates gets its own clone.
///
/// # Examples
///
/// ```no_run
/// # use dwd_wfs::{DwdClient, DwdError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), DwdError> {
/// let client = DwdClient::new()?;
///
/// let warnings = client.weather_warnings("Kreis Stade").await;
/// println!("{}", warnings);
///
/// let pollen = client.pollen_flight(62).await;
/// println!("{}", pollen);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DwdClient {
    transport: GeoserverClient,
}

#[bon]
impl DwdClient {
    /// Creates a client against the public DWD geoserver with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`DwdError::Wfs`] if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, DwdError> {
        Self::with_config().call()
    }

    /// Creates a client with custom transport settings.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.base_url(..)`: Optional. WFS endpoint, defaults to `https://maps.dwd.de/geoserver/dwd/ows`.
    /// * `.timeout(Duration)`: Optional. Connect plus read timeout per request, defaults to 30 seconds.
    ///   A request running into it counts as "no data" like any other transport failure.
    /// * `.user_agent(..)`: Optional. Defaults to `dwd_wfs/<version>`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dwd_wfs::{DwdClient, DwdError};
    /// # use std::time::Duration;
    /// # fn main() -> Result<(), DwdError> {
    /// let client = DwdClient::with_config()
    ///     .timeout(Duration::from_secs(5))
    ///     .user_agent("my-weather-station/1.0")
    ///     .call()?;
    /// assert_eq!(client.transport().base_url(), "https://maps.dwd.de/geoserver/dwd/ows");
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn with_config(
        #[builder(into)] base_url: Option<String>,
        timeout: Option<Duration>,
        #[builder(into)] user_agent: Option<String>,
    ) -> Result<Self, DwdError> {
        let transport = GeoserverClient::new(
            base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout.unwrap_or(DEFAULT_TIMEOUT),
            user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        )?;
        Ok(Self { transport })
    }

    pub fn transport(&self) -> &GeoserverClient {
        &self.transport
    }

    /// Weather warnings for a warncell id, warncell name or [`crate::LatLon`] location.
    pub async fn weather_warnings(&self, identifier: impl Into<Identifier>) -> WeatherWarnings {
        WeatherWarnings::new(self.transport.clone(), identifier).await
    }

    /// Pollen flight forecast for a pollen region id or (part of a) region name.
    pub async fn pollen_flight(&self, identifier: impl Into<Identifier>) -> CellForecast {
        CellForecast::pollen_flight(self.transport.clone(), identifier).await
    }

    /// Bioweather forecast for a bioweather region id or exact region name.
    pub async fn bioweather(&self, identifier: impl Into<Identifier>) -> CellForecast {
        CellForecast::bioweather(self.transport.clone(), identifier).await
    }

    /// Resolves `identifier` without fetching any records.
    ///
    /// # Errors
    ///
    /// Returns [`DwdError::Resolve`] if the identifier is invalid for `domain` or
    /// matches no cell.
    pub async fn resolve(
        &self,
        domain: Domain,
        identifier: impl Into<Identifier>,
    ) -> Result<ResolvedCell, DwdError> {
        Ok(resolve(&self.transport, domain, &identifier.into()).await?)
    }

    /// Lists every cell of `domain`, sorted by id.
    ///
    /// # Errors
    ///
    /// Returns [`DwdError::Wfs`] if a region layer cannot be fetched, or
    /// [`DwdError::Normalize`]/[`DwdError::MalformedLayer`] if its content is unusable.
    pub async fn list_cells(&self, domain: Domain) -> Result<Vec<CellInfo>, DwdError> {
        list_cells(&self.transport, domain).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let client = DwdClient::new().unwrap();
        assert_eq!(client.transport().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_custom_base_url() {
        let client = DwdClient::with_config()
            .base_url("http://localhost:8080/geoserver/dwd/ows")
            .timeout(Duration::from_secs(1))
            .call()
            .unwrap();
        assert_eq!(
            client.transport().base_url(),
            "http://localhost:8080/geoserver/dwd/ows"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_gives_invalid_objects() {
        let client = DwdClient::with_config()
            .base_url("http://127.0.0.1:9/geoserver/dwd/ows")
            .timeout(Duration::from_secs(2))
            .call()
            .unwrap();

        let warnings = client.weather_warnings(808436003).await;
        assert!(!warnings.is_valid());
        assert_eq!(warnings.warncell_id(), None);

        let pollen = client.pollen_flight("Harz").await;
        assert!(!pollen.is_valid());

        assert!(matches!(
            client.resolve(Domain::BioWeather, 2).await,
            Err(DwdError::Resolve(_))
        ));
        assert!(matches!(
            client.list_cells(Domain::BioWeather).await,
            Err(DwdError::Wfs(_))
        ));
    }
}
