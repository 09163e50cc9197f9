//! Catalog of the geoserver layers each data domain is resolved against.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of data the DWD geoserver publishes per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// Weather warnings for municipalities, counties, lakes, coast and sea areas.
    WeatherWarnings,
    /// Pollen flight forecast for the pollen flight regions.
    PollenFlight,
    /// Biometeorological forecast for the bioweather regions.
    BioWeather,
}

/// A region layer that can be searched for a cell, paired with the layer
/// holding the records for cells found in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionLayer {
    /// Layer holding the region polygons, e.g. `dwd:Warngebiete_Gemeinden`.
    pub region_layer: &'static str,
    /// Layer holding the records of those regions, e.g. `dwd:Warnungen_Gemeinden`.
    pub record_layer: &'static str,
    /// Field the record layer is filtered on once a cell is known.
    pub record_id_field: &'static str,
}

/// How a name identifier is matched against the name field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NameMatch {
    Exact,
    Substring,
}

/// When a lookup with several features is reported as ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Uniqueness {
    /// Any second feature makes the match ambiguous.
    SingleFeature,
    /// Only features with a different cell id make the match ambiguous.
    DistinctIds,
}

// Searched in this order, the first layer with a match wins.
const WARNING_LAYERS: &[RegionLayer] = &[
    RegionLayer {
        region_layer: "dwd:Warngebiete_Gemeinden",
        record_layer: "dwd:Warnungen_Gemeinden",
        record_id_field: "WARNCELLID",
    },
    RegionLayer {
        region_layer: "dwd:Warngebiete_Kreise",
        record_layer: "dwd:Warnungen_Landkreise",
        record_id_field: "GC_WARNCELLID",
    },
    RegionLayer {
        region_layer: "dwd:Warngebiete_Binnenseen",
        record_layer: "dwd:Warnungen_Binnenseen",
        record_id_field: "WARNCELLID",
    },
    RegionLayer {
        region_layer: "dwd:Warngebiete_Kueste",
        record_layer: "dwd:Warnungen_Kueste",
        record_id_field: "WARNCELLID",
    },
    RegionLayer {
        region_layer: "dwd:Warngebiete_See",
        record_layer: "dwd:Warnungen_See",
        record_id_field: "WARNCELLID",
    },
];

const POLLEN_LAYERS: &[RegionLayer] = &[RegionLayer {
    region_layer: "dwd:Pollenfluggebiete",
    record_layer: "dwd:Pollenflug",
    record_id_field: "GF",
}];

const BIOWEATHER_LAYERS: &[RegionLayer] = &[RegionLayer {
    region_layer: "dwd:Biowettergebiete",
    record_layer: "dwd:Biowetter",
    record_id_field: "GF",
}];

pub(crate) const NOT_UNIQUE_MARKER: &str = " (not unique use ID!)";

impl Domain {
    /// Region layers in search order.
    pub fn region_layers(&self) -> &'static [RegionLayer] {
        match self {
            Domain::WeatherWarnings => WARNING_LAYERS,
            Domain::PollenFlight => POLLEN_LAYERS,
            Domain::BioWeather => BIOWEATHER_LAYERS,
        }
    }

    /// Field holding the cell id in the region layers.
    pub fn id_field(&self) -> &'static str {
        match self {
            Domain::WeatherWarnings => "WARNCELLID",
            Domain::PollenFlight | Domain::BioWeather => "GF",
        }
    }

    /// Field holding the cell name in the region layers.
    pub fn name_field(&self) -> &'static str {
        match self {
            Domain::WeatherWarnings => "NAME",
            Domain::PollenFlight | Domain::BioWeather => "GEN",
        }
    }

    /// Whether cells of this domain can be located by GPS coordinates.
    pub fn supports_location(&self) -> bool {
        matches!(self, Domain::WeatherWarnings)
    }

    /// Field of a forecast record carrying its numeric impact level.
    pub fn forecast_level_field(&self) -> Option<&'static str> {
        match self {
            Domain::WeatherWarnings => None,
            Domain::PollenFlight => Some("POLLENINT"),
            Domain::BioWeather => Some("IMPACT"),
        }
    }

    pub(crate) fn name_match(&self) -> NameMatch {
        match self {
            Domain::PollenFlight => NameMatch::Substring,
            Domain::WeatherWarnings | Domain::BioWeather => NameMatch::Exact,
        }
    }

    pub(crate) fn uniqueness(&self) -> Uniqueness {
        match self {
            Domain::WeatherWarnings => Uniqueness::SingleFeature,
            Domain::PollenFlight | Domain::BioWeather => Uniqueness::DistinctIds,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Domain::WeatherWarnings => "weather warnings",
            Domain::PollenFlight => "pollen flight",
            Domain::BioWeather => "bioweather",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counties_use_their_own_record_field() {
        let counties = Domain::WeatherWarnings
            .region_layers()
            .iter()
            .find(|l| l.region_layer == "dwd:Warngebiete_Kreise")
            .unwrap();
        assert_eq!(counties.record_layer, "dwd:Warnungen_Landkreise");
        assert_eq!(counties.record_id_field, "GC_WARNCELLID");

        assert!(Domain::WeatherWarnings
            .region_layers()
            .iter()
            .filter(|l| l.region_layer != "dwd:Warngebiete_Kreise")
            .all(|l| l.record_id_field == "WARNCELLID"));
    }

    #[test]
    fn test_municipalities_are_searched_first() {
        assert_eq!(
            Domain::WeatherWarnings.region_layers()[0].region_layer,
            "dwd:Warngebiete_Gemeinden"
        );
    }

    #[test]
    fn test_only_warnings_support_location() {
        assert!(Domain::WeatherWarnings.supports_location());
        assert!(!Domain::PollenFlight.supports_location());
        assert!(!Domain::BioWeather.supports_location());
    }
}
