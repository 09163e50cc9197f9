use crate::query::geoserver::FeatureSource;
use crate::query::region_query::RegionQuery;
use crate::resolver::error::ResolveError;
use crate::resolver::identifier::{Identifier, LatLon};
use crate::resolver::layers::{Domain, NameMatch, RegionLayer, Uniqueness, NOT_UNIQUE_MARKER};
use crate::utils::{cql_literal, value_as_i64, value_as_string};
use log::{debug, info, warn};
use serde_json::Value;

/// A cell the identifier was resolved to, with the query fetching its records.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCell {
    id: i64,
    name: String,
    unique: bool,
    region_layer: &'static str,
    follow_up: RegionQuery,
}

impl ResolvedCell {
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Display name, suffixed with a marker when the identifier matched more than one cell.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Region layer the cell was found in.
    pub fn region_layer(&self) -> &'static str {
        self.region_layer
    }

    /// Query fetching the records of this cell, replayed on every update.
    pub fn follow_up(&self) -> &RegionQuery {
        &self.follow_up
    }
}

/// Builds the CQL filter that looks `identifier` up in the region layers of `domain`.
pub fn region_filter(domain: Domain, identifier: &Identifier) -> Result<String, ResolveError> {
    match identifier {
        Identifier::Id(id) => Ok(format!("{}='{}'", domain.id_field(), id)),
        Identifier::Name(name) => {
            if name.trim().is_empty() {
                return Err(ResolveError::InvalidIdentifier(identifier.clone()));
            }
            Ok(match domain.name_match() {
                NameMatch::Exact => format!("{}={}", domain.name_field(), cql_literal(name)),
                NameMatch::Substring => format!(
                    "{} LIKE {}",
                    domain.name_field(),
                    cql_literal(&format!("%{}%", name))
                ),
            })
        }
        Identifier::Location(location) => {
            if !domain.supports_location() {
                return Err(ResolveError::UnsupportedIdentifier {
                    identifier: identifier.clone(),
                    domain,
                });
            }
            if !location.is_valid() {
                return Err(ResolveError::InvalidIdentifier(identifier.clone()));
            }
            let LatLon(lat, lon) = location;
            Ok(format!("CONTAINS(SHAPE, Point({} {}))", lat, lon))
        }
    }
}

/// Finds the cell `identifier` refers to.
///
/// The region layers of `domain` are queried one after another in catalog order and
/// the first layer returning at least one feature decides the result. A layer that
/// cannot be queried counts as having no match.
pub async fn resolve<S: FeatureSource>(
    source: &S,
    domain: Domain,
    identifier: &Identifier,
) -> Result<ResolvedCell, ResolveError> {
    let filter = region_filter(domain, identifier)?;

    for layer in domain.region_layers() {
        let query = RegionQuery::builder()
            .type_name(layer.region_layer)
            .cql_filter(filter.clone())
            .build();

        let collection = match source.get_features(&query).await {
            Ok(collection) => collection,
            Err(e) => {
                warn!("Lookup of {} in {} failed: {}", identifier, layer.region_layer, e);
                continue;
            }
        };

        let features = collection
            .get("features")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let matched = collection
            .get("numberReturned")
            .and_then(value_as_i64)
            .unwrap_or(features.len() as i64);

        if matched <= 0 {
            debug!("No match for {} in {}", identifier, layer.region_layer);
            continue;
        }

        let cell = cell_from_match(domain, layer, features, matched)?;
        info!(
            "Resolved {} to {} cell {} '{}' via {}",
            identifier, domain, cell.id, cell.name, layer.region_layer
        );
        return Ok(cell);
    }

    Err(ResolveError::NoMatch {
        identifier: identifier.clone(),
        domain,
    })
}

fn cell_from_match(
    domain: Domain,
    layer: &RegionLayer,
    features: &[Value],
    matched: i64,
) -> Result<ResolvedCell, ResolveError> {
    let id_field = domain.id_field();
    let name_field = domain.name_field();
    let feature_id = |feature: &Value| {
        feature
            .pointer(&format!("/properties/{}", id_field))
            .and_then(value_as_i64)
    };

    let first = features.first().ok_or(ResolveError::MalformedMatch {
        layer: layer.region_layer,
        field: "features",
    })?;
    let id = feature_id(first).ok_or(ResolveError::MalformedMatch {
        layer: layer.region_layer,
        field: id_field,
    })?;
    let mut name = first
        .pointer(&format!("/properties/{}", name_field))
        .and_then(value_as_string)
        .ok_or(ResolveError::MalformedMatch {
            layer: layer.region_layer,
            field: name_field,
        })?;

    let unique = match domain.uniqueness() {
        Uniqueness::SingleFeature => matched == 1,
        // the server returns some regions twice, those are not ambiguous
        Uniqueness::DistinctIds => features.iter().all(|f| feature_id(f) == Some(id)),
    };
    if !unique {
        name.push_str(NOT_UNIQUE_MARKER);
    }

    let follow_up = RegionQuery::builder()
        .type_name(layer.record_layer)
        .cql_filter(format!("{}='{}'", layer.record_id_field, id))
        .build();

    Ok(ResolvedCell {
        id,
        name,
        unique,
        region_layer: layer.region_layer,
        follow_up,
    })
}
