use serde::{Deserialize, Serialize};

/// A reference to a schema instance created by the host's instantiation
/// capability. The engine never looks inside instances; it only carries
/// references through tuples, groups, and lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceRef {
    pub type_name: String,
    pub id: u64,
}

impl InstanceRef {
    pub fn new(type_name: impl Into<String>, id: u64) -> Self {
        Self {
            type_name: type_name.into(),
            id,
        }
    }
}

/// A value flowing through the engine: a list element, a constructor
/// argument, or a member of a candidate tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
    Ref(InstanceRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Option<&InstanceRef> {
        match self {
            Value::Ref(instance) => Some(instance),
            _ => None,
        }
    }

    /// Stable identity key used by the no-repeat match cache.
    pub fn cache_key(&self) -> String {
        match self {
            Value::Null => "<null>".to_string(),
            Value::Bool(value) => value.to_string(),
            Value::Int(value) => value.to_string(),
            Value::Real(value) => value.to_string(),
            Value::Str(value) => value.clone(),
            Value::Ref(instance) => format!("{}#{}", instance.type_name, instance.id),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<InstanceRef> for Value {
    fn from(value: InstanceRef) -> Self {
        Value::Ref(value)
    }
}
