// Detection of list-shaped values assigned in a snippet.

use serde::Serialize;

use super::value::Value;

/// Operations every detected structure supports.
pub const OPERATIONS: [&str; 2] = ["read", "write"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataStructureKind {
    Array,
    /// A list whose first element is itself list-shaped
    Graph,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataStructureInstance {
    #[serde(rename = "type")]
    pub kind: DataStructureKind,
    pub data: Value,
    pub operations: Vec<String>,
}

impl DataStructureInstance {
    /// Classify an inferred value; `None` unless it is a list.
    pub fn detect(value: &Value) -> Option<DataStructureInstance> {
        let items = value.as_list()?;
        let kind = match items.first() {
            Some(first) if first.is_list_shaped() => DataStructureKind::Graph,
            _ => DataStructureKind::Array,
        };
        Some(DataStructureInstance {
            kind,
            data: value.clone(),
            operations: OPERATIONS.iter().map(|op| op.to_string()).collect(),
        })
    }
}
