use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// An annotation value already evaluated by the host rule engine: a typed
/// literal, a two-element integer range, or an ordered argument list. The
/// engine interprets these, it never parses annotation syntax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnnotationValue {
    Int(i64),
    Real(f64),
    Bool(bool),
    Str(String),
    Range(i64, i64),
    Args(Vec<Value>),
}

/// The named annotation values attached to one rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    values: HashMap<String, AnnotationValue>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: AnnotationValue) {
        self.values.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AnnotationValue> {
        self.values.get(name)
    }

    /// Flag semantics: present counts as set unless explicitly `false`.
    pub fn flag(&self, name: &str) -> bool {
        match self.values.get(name) {
            None => false,
            Some(AnnotationValue::Bool(value)) => *value,
            Some(_) => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, AnnotationValue)> for AnnotationSet {
    fn from_iter<T: IntoIterator<Item = (String, AnnotationValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
