//! Normalization of the pollen flight and bioweather forecast features.
//!
//! Both layers publish one feature per forecast type and day. Features are grouped
//! by their type code (`EC_II`) into a [`ForecastSeries`] ordered by start time.

use crate::normalize::collection::read_collection;
use crate::normalize::convert::{color_or_default, timestamp_value};
use crate::normalize::error::NormalizeError;
use crate::utils::value_as_i64;
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// One forecast value of one forecast type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastRecord {
    pub start_time: DateTime<Utc>,
    /// Impact level, 0-6 for pollen flight and 0-3 for bioweather.
    pub level: i64,
    /// Text form of the impact level, e.g. `"1-2"` or `"geringe Belastung"`.
    pub impact: String,
    /// Forecast color formatted `#rrggbb`.
    pub color: String,
}

impl ForecastRecord {
    /// Builds a record from the `properties` of a forecast feature.
    ///
    /// Returns `None` when the start time, the level in `level_field` or the impact
    /// label cannot be read. Only the color has a fallback.
    pub fn from_properties(properties: &Map<String, Value>, level_field: &str) -> Option<Self> {
        Some(Self {
            start_time: properties.get("FORECAST_DATE").and_then(timestamp_value)?,
            level: properties.get(level_field).and_then(value_as_i64)?,
            impact: properties.get("PARAMETER_VALUE").and_then(label)?,
            color: color_or_default(properties.get("EC_AREA_COLOR")),
        })
    }
}

fn label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// All forecasts of one forecast type, e.g. birch pollen or heat stress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    /// Name of the forecast type as published by DWD.
    pub name: String,
    /// Forecasts sorted by start time, without duplicates.
    pub forecast: Vec<ForecastRecord>,
}

/// Every forecast series of one cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    /// UTC timestamp of the data as reported by the server.
    pub last_update: DateTime<Utc>,
    /// Series keyed by their numeric forecast type.
    pub forecast_data: BTreeMap<i64, ForecastSeries>,
}

impl ForecastReport {
    /// Total number of forecast records over all series.
    pub fn len(&self) -> usize {
        self.forecast_data.values().map(|s| s.forecast.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest impact level over all series, 0 when there are no records.
    pub fn highest_level(&self) -> i64 {
        self.forecast_data
            .values()
            .flat_map(|s| s.forecast.iter().map(|f| f.level))
            .max()
            .unwrap_or(0)
            .max(0)
    }
}

/// Normalizes a forecast feature collection, reading levels from `level_field`.
///
/// Every feature needs a readable type code, and the first feature of each type a
/// type name; otherwise the collection fails as a whole. Features whose forecast
/// values cannot be read are skipped.
pub fn parse_forecast_collection(
    collection: &Value,
    level_field: &str,
) -> Result<ForecastReport, NormalizeError> {
    let collection = read_collection(collection)?;

    let mut forecast_data: BTreeMap<i64, ForecastSeries> = BTreeMap::new();
    for (index, properties) in collection.properties.into_iter().enumerate() {
        let type_code = properties
            .get("EC_II")
            .and_then(value_as_i64)
            .ok_or(NormalizeError::MalformedFeature {
                index,
                field: "EC_II",
            })?;

        let series = match forecast_data.entry(type_code) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let name = properties
                    .get("PARAMETER_NAME")
                    .and_then(Value::as_str)
                    .ok_or(NormalizeError::MalformedFeature {
                        index,
                        field: "PARAMETER_NAME",
                    })?;
                entry.insert(ForecastSeries {
                    name: name.to_string(),
                    forecast: Vec::new(),
                })
            }
        };

        match ForecastRecord::from_properties(properties, level_field) {
            Some(record) if !series.forecast.contains(&record) => series.forecast.push(record),
            Some(_) => {}
            None => debug!("Skipping unreadable forecast feature {} of type {}", index, type_code),
        }
    }

    for series in forecast_data.values_mut() {
        series.forecast.sort_by_key(|f| f.start_time);
    }

    Ok(ForecastReport {
        last_update: collection.last_update,
        forecast_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::collection;
    use chrono::TimeZone;
    use serde_json::json;

    fn pollen(ec_ii: i64, name: &str, date: &str, level: i64, impact: &str) -> Value {
        json!({
            "GF": 62,
            "GEN": "Harz",
            "EC_II": ec_ii,
            "PARAMETER_NAME": name,
            "FORECAST_DATE": date,
            "POLLENINT": level,
            "PARAMETER_VALUE": impact,
            "EC_AREA_COLOR": "255 204 0",
        })
    }

    #[test]
    fn test_groups_sorts_and_deduplicates() {
        let value = collection(
            "2024-05-01T09:00:00Z",
            vec![
                pollen(1, "Birke", "2024-05-03T00:00:00Z", 2, "1-2"),
                pollen(1, "Birke", "2024-05-01T00:00:00Z", 4, "2-3"),
                pollen(2, "Gräser", "2024-05-01T00:00:00Z", 1, "0-1"),
                pollen(1, "Birke", "2024-05-02T00:00:00Z", 3, "2"),
                pollen(1, "Birke", "2024-05-01T00:00:00Z", 4, "2-3"),
            ],
        );
        let report = parse_forecast_collection(&value, "POLLENINT").unwrap();

        assert_eq!(report.forecast_data.len(), 2);
        let birch = &report.forecast_data[&1];
        assert_eq!(birch.name, "Birke");
        let days: Vec<u32> = birch
            .forecast
            .iter()
            .map(|f| chrono::Datelike::day(&f.start_time))
            .collect();
        assert_eq!(days, vec![1, 2, 3]);
        assert_eq!(birch.forecast[0].level, 4);
        assert_eq!(birch.forecast[0].impact, "2-3");
        assert_eq!(birch.forecast[0].color, "#ffcc00");

        assert_eq!(report.forecast_data[&2].name, "Gräser");
        assert_eq!(report.len(), 4);
        assert_eq!(report.highest_level(), 4);
    }

    #[test]
    fn test_unreadable_feature_is_dropped() {
        let mut broken_date = pollen(1, "Birke", "soon", 2, "1-2");
        let mut broken_level = pollen(1, "Birke", "2024-05-02T00:00:00Z", 0, "1-2");
        broken_level["POLLENINT"] = json!("viel");
        broken_date["EC_AREA_COLOR"] = json!("nope");
        let mut no_color = pollen(1, "Birke", "2024-05-03T00:00:00Z", 1, "0-1");
        no_color.as_object_mut().unwrap().remove("EC_AREA_COLOR");

        let value = collection(
            "2024-05-01T09:00:00Z",
            vec![
                broken_date,
                broken_level,
                no_color,
                pollen(1, "Birke", "2024-05-01T00:00:00Z", 3, "2"),
            ],
        );
        let report = parse_forecast_collection(&value, "POLLENINT").unwrap();

        let birch = &report.forecast_data[&1];
        assert_eq!(birch.forecast.len(), 2);
        assert_eq!(
            birch.forecast[0].start_time,
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(birch.forecast[1].color, "#000000");
    }

    #[test]
    fn test_level_field_is_domain_specific() {
        let value = collection(
            "2024-05-01T09:00:00Z",
            vec![json!({
                "EC_II": "5",
                "PARAMETER_NAME": "Wärmebelastung",
                "FORECAST_DATE": "2024-05-01",
                "IMPACT": "2",
                "PARAMETER_VALUE": "mäßige Belastung",
            })],
        );
        let report = parse_forecast_collection(&value, "IMPACT").unwrap();
        assert_eq!(report.forecast_data[&5].forecast[0].level, 2);

        let report = parse_forecast_collection(&value, "POLLENINT").unwrap();
        assert!(report.forecast_data[&5].forecast.is_empty());
        assert!(report.is_empty());
        assert_eq!(report.highest_level(), 0);
    }

    #[test]
    fn test_missing_type_code_fails_whole_collection() {
        let mut orphan = pollen(1, "Birke", "2024-05-01T00:00:00Z", 3, "2");
        orphan.as_object_mut().unwrap().remove("EC_II");
        let value = collection(
            "2024-05-01T09:00:00Z",
            vec![pollen(1, "Birke", "2024-05-02T00:00:00Z", 3, "2"), orphan],
        );
        assert!(matches!(
            parse_forecast_collection(&value, "POLLENINT"),
            Err(NormalizeError::MalformedFeature { index: 1, field: "EC_II" })
        ));
    }

    #[test]
    fn test_missing_type_name_fails_whole_collection() {
        let mut nameless = pollen(7, "Ambrosia", "2024-05-01T00:00:00Z", 0, "0");
        nameless.as_object_mut().unwrap().remove("PARAMETER_NAME");
        let value = collection("2024-05-01T09:00:00Z", vec![nameless]);
        assert!(parse_forecast_collection(&value, "POLLENINT").is_err());
    }
}
