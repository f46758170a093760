// Values the trace attaches to variables, parameters and memory cells.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Marker text used wherever no real value can be inferred.
pub const PLACEHOLDER: &str = "value";

/// An inferred value. Never the result of evaluating anything.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Double(f64),
    Text(String),
    List(Vec<Value>),
    /// Right-hand side that matched no inference strategy.
    Opaque,
}

impl Value {
    /// Type tag shown next to memory objects.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Text(_) => "String",
            Value::List(_) => "List/Array",
            Value::Opaque => "Object",
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// A nested element counts as list-shaped when it was parsed as a list or
    /// survived the flat comma split as raw bracketed text.
    pub fn is_list_shaped(&self) -> bool {
        match self {
            Value::List(_) => true,
            Value::Text(text) => text.starts_with('['),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Double(d) => write!(f, "{d:?}"),
            Value::Text(s) => write!(f, "\"{s}\""),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Value::Opaque => write!(f, "{PLACEHOLDER}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(n) => serializer.serialize_i32(*n),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Opaque => serializer.serialize_str(PLACEHOLDER),
        }
    }
}
