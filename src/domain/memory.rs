// Synthetic heap cells recorded per assignment.

use serde::Serialize;
use uuid::Uuid;

use super::value::Value;

/// One assignment's storage record. Append-only: reassignment creates a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryObject {
    /// Illustrative only, e.g. `0x1f3a9c2e`
    pub address: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub value: Value,
    pub references: Vec<String>,
}

impl MemoryObject {
    pub fn new(address: String, variable: &str, value: Value) -> Self {
        Self {
            address,
            type_tag: value.type_tag().to_string(),
            value,
            references: vec![variable.to_string()],
        }
    }
}

/// Fresh address token not used by any object in `existing`.
pub fn fresh_address(existing: &[MemoryObject]) -> String {
    loop {
        let uuid = Uuid::new_v4().simple().to_string();
        let address = format!("0x{}", &uuid[..8]);
        if !existing.iter().any(|obj| obj.address == address) {
            return address;
        }
    }
}
