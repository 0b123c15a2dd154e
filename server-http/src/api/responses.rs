use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
    pub objects: usize,
}

/// Live keys labelled by synthetic indices, e.g. `{"0": "cat.png", "1": "dog.png"}`
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ListObjectsResponse(pub BTreeMap<String, String>);
