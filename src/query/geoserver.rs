use crate::query::error::WfsError;
use crate::query::region_query::RegionQuery;
use log::{debug, warn};
use reqwest::{Client, Request};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://maps.dwd.de/geoserver/dwd/ows";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Anything that can answer a [`RegionQuery`] with a JSON feature collection.
///
/// [`GeoserverClient`] is the network implementation. The resolver and the
/// result objects are generic over this trait so they can run against any
/// other source of feature collections.
pub trait FeatureSource {
    fn get_features(
        &self,
        query: &RegionQuery,
    ) -> impl Future<Output = Result<Value, WfsError>> + Send;
}

/// HTTP transport for the DWD geoserver.
///
/// Cloning is cheap, clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GeoserverClient {
    http: Client,
    base_url: String,
}

impl GeoserverClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, WfsError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(WfsError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the GET request for `query` without sending it.
    pub fn build_request(&self, query: &RegionQuery) -> Result<Request, WfsError> {
        self.http
            .get(&self.base_url)
            .query(&query.query_pairs())
            .build()
            .map_err(|e| WfsError::RequestBuild(query.type_name().to_string(), e))
    }

    /// Sends `query` and decodes the response body as JSON.
    pub async fn fetch(&self, query: &RegionQuery) -> Result<Value, WfsError> {
        let request = self.build_request(query)?;
        let url = request.url().to_string();
        debug!("Querying geoserver: {}", url);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| WfsError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    WfsError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    WfsError::NetworkRequest(url, e)
                });
            }
        };

        response
            .json::<Value>()
            .await
            .map_err(|e| WfsError::JsonParse(url, e))
    }
}

impl FeatureSource for GeoserverClient {
    async fn get_features(&self, query: &RegionQuery) -> Result<Value, WfsError> {
        self.fetch(query).await
    }
}
