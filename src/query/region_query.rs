//! Describes a single WFS `GetFeature` request against the DWD geoserver.
//!
//! A [`RegionQuery`] names the layer to read and optionally narrows it with a
//! CQL filter. Everything else the geoserver expects (service, version, request
//! kind, output format) has a fixed default that can be overridden per query.

use bon::bon;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WFS_SERVICE: &str = "WFS";
pub const DEFAULT_WFS_VERSION: &str = "2.0.0";
pub const DEFAULT_WFS_REQUEST: &str = "GetFeature";
pub const DEFAULT_WFS_OUTPUT_FORMAT: &str = "application/json";

/// Parameters of one geoserver request.
///
/// # Examples
///
/// ```
/// use dwd_wfs::RegionQuery;
///
/// let query = RegionQuery::builder()
///     .type_name("dwd:Warnungen_Gemeinden")
///     .cql_filter("WARNCELLID='808436003'")
///     .build();
///
/// assert_eq!(query.type_name(), "dwd:Warnungen_Gemeinden");
/// assert_eq!(query.output_format(), "application/json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionQuery {
    type_name: String,
    cql_filter: Option<String>,
    output_format: Option<String>,
    version: Option<String>,
    request: Option<String>,
}

#[bon]
impl RegionQuery {
    /// Creates a query for `type_name`, the only required parameter.
    ///
    /// # Arguments
    ///
    /// * `.type_name(..)`: **Required.** Layer to read, e.g. `"dwd:Pollenflug"`.
    /// * `.cql_filter(..)`: Optional. CQL expression restricting the returned features.
    /// * `.output_format(..)`: Optional. Defaults to `application/json`.
    /// * `.version(..)`: Optional. WFS protocol version, defaults to `2.0.0`.
    /// * `.request(..)`: Optional. WFS request kind, defaults to `GetFeature`.
    #[builder]
    pub fn new(
        #[builder(into)] type_name: String,
        #[builder(into)] cql_filter: Option<String>,
        #[builder(into)] output_format: Option<String>,
        #[builder(into)] version: Option<String>,
        #[builder(into)] request: Option<String>,
    ) -> Self {
        Self {
            type_name,
            cql_filter,
            output_format,
            version,
            request,
        }
    }

    /// Builds a query from loosely named parameters.
    ///
    /// Keys are matched case-insensitively against `typename`, `cql_filter`,
    /// `outputformat`, `version` and `request`; unknown keys are ignored.
    /// Returns `None` when no type name is given, since a request without a
    /// layer has no meaning and must not be sent.
    ///
    /// ```
    /// use dwd_wfs::RegionQuery;
    ///
    /// let query = RegionQuery::from_params([("typeName", "dwd:Pollenflug"), ("CQL_FILTER", "GF='11'")]);
    /// assert_eq!(query.unwrap().cql_filter(), Some("GF='11'"));
    ///
    /// assert!(RegionQuery::from_params([("CQL_FILTER", "GF='11'")]).is_none());
    /// ```
    pub fn from_params<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Option<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut type_name = None;
        let mut cql_filter = None;
        let mut output_format = None;
        let mut version = None;
        let mut request = None;

        for (key, value) in params {
            let value = value.as_ref().to_string();
            match key.as_ref().to_lowercase().as_str() {
                "typename" => type_name = Some(value),
                "cql_filter" => cql_filter = Some(value),
                "outputformat" => output_format = Some(value),
                "version" => version = Some(value),
                "request" => request = Some(value),
                _ => {}
            }
        }

        Some(Self {
            type_name: type_name?,
            cql_filter,
            output_format,
            version,
            request,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn cql_filter(&self) -> Option<&str> {
        self.cql_filter.as_deref()
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(DEFAULT_WFS_OUTPUT_FORMAT)
    }

    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_WFS_VERSION)
    }

    pub fn request(&self) -> &str {
        self.request.as_deref().unwrap_or(DEFAULT_WFS_REQUEST)
    }

    /// Query string parameters in the order the geoserver documents them.
    /// `CQL_FILTER` is left out entirely when no filter is set.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("service", DEFAULT_WFS_SERVICE),
            ("version", self.version()),
            ("request", self.request()),
            ("typeName", self.type_name()),
        ];
        if let Some(filter) = self.cql_filter() {
            pairs.push(("CQL_FILTER", filter));
        }
        pairs.push(("OutputFormat", self.output_format()));
        pairs
    }
}
