//! Listing of every cell a domain knows about.

use crate::error::DwdError;
use crate::normalize::collection::read_collection;
use crate::query::geoserver::FeatureSource;
use crate::query::region_query::RegionQuery;
use crate::resolver::layers::Domain;
use crate::utils::{value_as_i64, value_as_string};
use log::info;
use serde::Serialize;

/// A cell as listed in a region layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellInfo {
    pub id: i64,
    pub name: String,
    /// Region layer listing the cell, e.g. `dwd:Warngebiete_Kreise`.
    pub layer: &'static str,
}

/// Reads all region layers of `domain` and returns their cells sorted by id.
///
/// Cells listed more than once with the same id and name are returned once.
/// Unlike the result objects this fails loudly: any layer that cannot be read
/// fails the listing.
pub async fn list_cells<S: FeatureSource>(
    source: &S,
    domain: Domain,
) -> Result<Vec<CellInfo>, DwdError> {
    let mut cells = Vec::new();

    for layer in domain.region_layers() {
        let query = RegionQuery::builder().type_name(layer.region_layer).build();
        let collection = source.get_features(&query).await?;
        let collection = read_collection(&collection)?;

        for properties in collection.properties {
            let id = properties
                .get(domain.id_field())
                .and_then(value_as_i64)
                .ok_or(DwdError::MalformedLayer {
                    layer: layer.region_layer,
                    field: domain.id_field(),
                })?;
            let name = properties
                .get(domain.name_field())
                .and_then(value_as_string)
                .ok_or(DwdError::MalformedLayer {
                    layer: layer.region_layer,
                    field: domain.name_field(),
                })?;
            cells.push(CellInfo {
                id,
                name,
                layer: layer.region_layer,
            });
        }
        info!("Listed {} from {}", domain, layer.region_layer);
    }

    cells.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));
    cells.dedup_by(|a, b| a.id == b.id && a.name == b.name);
    Ok(cells)
}
