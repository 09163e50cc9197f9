//! In-memory feature source used by the unit tests.

use crate::query::error::WfsError;
use crate::query::geoserver::FeatureSource;
use crate::query::region_query::RegionQuery;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Key = (String, Option<String>);

/// Answers queries from a fixed table keyed by layer and filter, and records every query.
/// Queries without an entry fail like an unreachable server.
#[derive(Clone, Default)]
pub(crate) struct StaticSource {
    responses: Arc<Mutex<HashMap<Key, Value>>>,
    calls: Arc<Mutex<Vec<RegionQuery>>>,
}

impl StaticSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(self, type_name: &str, filter: &str, response: Value) -> Self {
        self.set(type_name, filter, response);
        self
    }

    /// Answers queries on `type_name` that carry no filter.
    pub(crate) fn with_unfiltered(self, type_name: &str, response: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((type_name.to_string(), None), response);
        self
    }

    pub(crate) fn set(&self, type_name: &str, filter: &str, response: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert((type_name.to_string(), Some(filter.to_string())), response);
    }

    pub(crate) fn remove(&self, type_name: &str, filter: &str) {
        self.responses
            .lock()
            .unwrap()
            .remove(&(type_name.to_string(), Some(filter.to_string())));
    }

    pub(crate) fn calls(&self) -> Vec<RegionQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl FeatureSource for StaticSource {
    async fn get_features(&self, query: &RegionQuery) -> Result<Value, WfsError> {
        self.calls.lock().unwrap().push(query.clone());
        let key = (
            query.type_name().to_string(),
            query.cql_filter().map(str::to_string),
        );
        match self.responses.lock().unwrap().get(&key) {
            Some(response) => Ok(response.clone()),
            None => Err(transport_error(query.type_name())),
        }
    }
}

pub(crate) fn transport_error(layer: &str) -> WfsError {
    let source = reqwest::Client::new()
        .get("unreachable geoserver")
        .build()
        .unwrap_err();
    WfsError::NetworkRequest(layer.to_string(), source)
}

/// A feature collection with the given property bags.
pub(crate) fn collection(time_stamp: &str, properties: Vec<Value>) -> Value {
    let features: Vec<Value> = properties
        .into_iter()
        .enumerate()
        .map(|(i, p)| json!({ "type": "Feature", "id": format!("feature.{}", i), "properties": p }))
        .collect();
    json!({
        "type": "FeatureCollection",
        "timeStamp": time_stamp,
        "numberReturned": features.len(),
        "features": features,
    })
}

pub(crate) fn empty_collection() -> Value {
    collection("2024-05-01T10:00:00Z", vec![])
}
