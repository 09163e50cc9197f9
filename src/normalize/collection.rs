use crate::normalize::convert::timestamp_value;
use crate::normalize::error::NormalizeError;
use crate::utils::value_as_i64;
use chrono::{DateTime, Utc};
use log::debug;
use serde_json::{Map, Value};

/// The parts of a WFS feature collection the normalizers work on.
pub(crate) struct FeatureCollection<'a> {
    pub last_update: DateTime<Utc>,
    pub properties: Vec<&'a Map<String, Value>>,
}

/// Checks the top-level structure of a feature collection and borrows the property bags.
///
/// A missing or unreadable `timeStamp` is replaced by the current time. Everything
/// else here is required: any violation fails the whole collection.
pub(crate) fn read_collection(collection: &Value) -> Result<FeatureCollection<'_>, NormalizeError> {
    let root = collection.as_object().ok_or(NormalizeError::NotAnObject)?;

    let last_update = root
        .get("timeStamp")
        .and_then(timestamp_value)
        .unwrap_or_else(|| {
            debug!("Feature collection has no usable timeStamp, using current time");
            Utc::now()
        });

    let number_returned = root
        .get("numberReturned")
        .ok_or(NormalizeError::MissingField("numberReturned"))?;
    if value_as_i64(number_returned).unwrap_or(0) <= 0 {
        return Ok(FeatureCollection {
            last_update,
            properties: Vec::new(),
        });
    }

    let features = root
        .get("features")
        .and_then(Value::as_array)
        .ok_or(NormalizeError::MissingField("features"))?;

    let properties = features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            feature
                .get("properties")
                .and_then(Value::as_object)
                .ok_or(NormalizeError::MalformedFeature {
                    index,
                    field: "properties",
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        last_update,
        properties,
    })
}
