//! Normalization of DWD weather warning features.

use crate::normalize::collection::read_collection;
use crate::normalize::convert::{
    color_or_default, decode_parameters, severity_level, timestamp_value, DEFAULT_COLOR,
};
use crate::normalize::error::NormalizeError;
use crate::utils::{value_as_i64, value_as_string};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Whether a warning is in effect now or announced for later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Immediate,
    Future,
}

impl Urgency {
    /// `"future"` in any casing is [`Urgency::Future`], everything else is immediate.
    pub fn from_field(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("future") {
            Urgency::Future
        } else {
            Urgency::Immediate
        }
    }
}

/// A single weather warning with every field read independently.
///
/// Fields the server did not send, or sent in an unreadable form, keep their
/// default: `None`, `0`, [`Urgency::Immediate`] or `"#000000"` for the color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningRecord {
    /// UTC timestamp when the warning starts (`onset`).
    pub start_time: Option<DateTime<Utc>>,
    /// UTC timestamp when the warning ends (`expires`).
    pub end_time: Option<DateTime<Utc>>,
    pub event: Option<String>,
    /// Numeric DWD event code (`EC_II`).
    pub event_code: i64,
    pub headline: Option<String>,
    pub description: Option<String>,
    /// Instructions and safety notices.
    pub instruction: Option<String>,
    pub urgency: Urgency,
    /// Warning level 0-4 derived from the CAP severity.
    pub level: u8,
    /// Event specific parameters such as expected gusts or rainfall.
    pub parameters: Option<BTreeMap<String, String>>,
    /// Warning color formatted `#rrggbb`.
    pub color: String,
}

impl Default for WarningRecord {
    fn default() -> Self {
        Self {
            start_time: None,
            end_time: None,
            event: None,
            event_code: 0,
            headline: None,
            description: None,
            instruction: None,
            urgency: Urgency::default(),
            level: 0,
            parameters: None,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl WarningRecord {
    /// Builds a record from the `properties` of a warning feature.
    ///
    /// Key casing differs between the warning layers, so keys are compared lower-cased.
    pub fn from_properties(properties: &Map<String, Value>) -> Self {
        let fields: HashMap<String, &Value> = properties
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        let field = |name: &str| fields.get(name).copied();
        let text = |name: &str| field(name).and_then(value_as_string);

        let parameters = match (
            field("parametername").and_then(Value::as_str),
            field("parametervalue").and_then(Value::as_str),
        ) {
            (Some(names), Some(values)) => Some(decode_parameters(names, values)),
            _ => None,
        };

        Self {
            start_time: field("onset").and_then(timestamp_value),
            end_time: field("expires").and_then(timestamp_value),
            event: text("event"),
            event_code: field("ec_ii").and_then(value_as_i64).unwrap_or(0),
            headline: text("headline"),
            description: text("description"),
            instruction: text("instruction"),
            urgency: field("urgency")
                .and_then(Value::as_str)
                .map(Urgency::from_field)
                .unwrap_or_default(),
            level: field("severity")
                .and_then(Value::as_str)
                .map(severity_level)
                .unwrap_or(0),
            parameters,
            color: color_or_default(field("ec_area_color")),
        }
    }
}

/// All warnings of one cell, split into those in effect and those expected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningReport {
    /// UTC timestamp of the data as reported by the server.
    pub last_update: DateTime<Utc>,
    /// Highest level among `current_warnings`, 0 when there are none.
    pub current_warning_level: u8,
    pub current_warnings: Vec<WarningRecord>,
    /// Highest level among `expected_warnings`, 0 when there are none.
    pub expected_warning_level: u8,
    pub expected_warnings: Vec<WarningRecord>,
}

impl WarningReport {
    pub fn len(&self) -> usize {
        self.current_warnings.len() + self.expected_warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalizes a warning feature collection.
///
/// Only a malformed collection structure fails; individual fields fall back to
/// their defaults.
pub fn parse_warning_collection(collection: &Value) -> Result<WarningReport, NormalizeError> {
    let collection = read_collection(collection)?;

    let mut current_warnings = Vec::new();
    let mut expected_warnings = Vec::new();
    for properties in collection.properties {
        let warning = WarningRecord::from_properties(properties);
        match warning.urgency {
            Urgency::Immediate => current_warnings.push(warning),
            Urgency::Future => expected_warnings.push(warning),
        }
    }

    Ok(WarningReport {
        last_update: collection.last_update,
        current_warning_level: max_level(&current_warnings),
        current_warnings,
        expected_warning_level: max_level(&expected_warnings),
        expected_warnings,
    })
}

fn max_level(warnings: &[WarningRecord]) -> u8 {
    warnings.iter().map(|w| w.level).max().unwrap_or(0)
}
