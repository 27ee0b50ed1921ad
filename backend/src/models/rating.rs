//! Rating reference entities

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque reference record from the ratings dataset, returned verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceEntity(pub Value);

impl ReferenceEntity {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ReferenceEntity {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
