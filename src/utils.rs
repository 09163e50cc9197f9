use serde_json::Value;

/// Reads an integer that the geoserver may send either as JSON number or as numeric string.
pub(crate) fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads a string field, ignoring other JSON types.
pub(crate) fn value_as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Quotes `value` as a CQL string literal.
pub(crate) fn cql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
