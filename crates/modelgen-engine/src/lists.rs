use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fs;
use std::path::Path;

use modelgen_core::Value;

use crate::errors::GenerationError;
use crate::random::RandomEngine;

/// Supplies the configured backing string for a list identifier. The
/// surrounding execution context decides where these strings come from
/// (launch parameters, config files, ...).
pub trait ListBindings {
    fn binding(&self, list_id: &str) -> Option<String>;
}

impl ListBindings for HashMap<String, String> {
    fn binding(&self, list_id: &str) -> Option<String> {
        self.get(list_id).cloned()
    }
}

/// Instance groups accumulated by creation rules. A group with the same
/// identifier as a configured list takes precedence over the literal or
/// file backing.
#[derive(Debug, Default)]
pub struct NamedGroups {
    groups: HashMap<String, Vec<Value>>,
}

impl NamedGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the group, creating it on first use.
    pub fn append(&mut self, name: &str, value: Value) {
        self.groups.entry(name.to_string()).or_default().push(value);
    }

    pub fn values(&self, name: &str) -> Option<&[Value]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn sizes(&self) -> BTreeMap<String, u64> {
        self.groups
            .iter()
            .map(|(name, values)| (name.clone(), values.len() as u64))
            .collect()
    }
}

/// Resolves named value pools and manages without-replacement sampling
/// state. One sample cursor exists per list identifier; refill policy is
/// fixed at construction.
pub struct ListResolver {
    bindings: Box<dyn ListBindings>,
    cache: HashMap<String, Vec<Value>>,
    cursors: HashMap<String, VecDeque<usize>>,
    refill: bool,
}

impl ListResolver {
    pub fn new(bindings: Box<dyn ListBindings>, refill: bool) -> Self {
        Self {
            bindings,
            cache: HashMap::new(),
            cursors: HashMap::new(),
            refill,
        }
    }

    pub fn refill_enabled(&self) -> bool {
        self.refill
    }

    /// Resolves the values backing `list_id`: the named group when one
    /// exists, otherwise the cached literal/file backing, resolved from
    /// the bindings on first use.
    pub fn resolved<'a>(
        &'a mut self,
        list_id: &str,
        groups: &'a NamedGroups,
    ) -> Result<&'a [Value], GenerationError> {
        if let Some(values) = groups.values(list_id) {
            return Ok(values);
        }
        if !self.cache.contains_key(list_id) {
            let raw = self
                .bindings
                .binding(list_id)
                .ok_or_else(|| GenerationError::ListNotFound(list_id.to_string()))?;
            let values = parse_backing(&raw)?;
            self.cache.insert(list_id.to_string(), values);
        }
        match self.cache.get(list_id) {
            Some(values) => Ok(values.as_slice()),
            None => Err(GenerationError::ListNotFound(list_id.to_string())),
        }
    }

    /// Uniform draw from the resolved list. An empty list yields `None`.
    pub fn next_from(
        &mut self,
        engine: &mut RandomEngine,
        list_id: &str,
        groups: &NamedGroups,
    ) -> Result<Option<Value>, GenerationError> {
        let values = self.resolved(list_id, groups)?;
        if values.is_empty() {
            return Ok(None);
        }
        let index = engine.int_between(0, values.len() as i64 - 1)?;
        Ok(values.get(index as usize).cloned())
    }

    /// Without-replacement draw. The first call per list builds a
    /// full-size permutation cursor; exhaustion either regenerates the
    /// cursor (refill enabled) or fails with `SampleExhausted`.
    pub fn next_as_sample(
        &mut self,
        engine: &mut RandomEngine,
        list_id: &str,
        groups: &NamedGroups,
    ) -> Result<Value, GenerationError> {
        let size = self.resolved(list_id, groups)?.len();
        let mut cursor = match self.cursors.remove(list_id) {
            Some(cursor) => cursor,
            None => VecDeque::from(engine.permutation(size, size)?),
        };
        let index = match cursor.pop_front() {
            Some(index) => index,
            None => {
                if !self.refill {
                    self.cursors.insert(list_id.to_string(), cursor);
                    return Err(GenerationError::SampleExhausted(list_id.to_string()));
                }
                cursor = VecDeque::from(engine.permutation(size, size)?);
                match cursor.pop_front() {
                    Some(index) => index,
                    None => return Err(GenerationError::SampleExhausted(list_id.to_string())),
                }
            }
        };
        self.cursors.insert(list_id.to_string(), cursor);
        let values = self.resolved(list_id, groups)?;
        values.get(index).cloned().ok_or_else(|| {
            GenerationError::InvalidRange(format!(
                "sample index {index} out of bounds for list '{list_id}'"
            ))
        })
    }

    /// One-shot sample of `k` distinct elements from the resolved list.
    pub fn sample_from(
        &mut self,
        engine: &mut RandomEngine,
        list_id: &str,
        k: i64,
        groups: &NamedGroups,
    ) -> Result<Vec<Value>, GenerationError> {
        let values = self.resolved(list_id, groups)?;
        sample_without_replacement(engine, values, k)
    }
}

/// Selection without replacement from an explicit source slice.
pub fn sample_without_replacement(
    engine: &mut RandomEngine,
    source: &[Value],
    k: i64,
) -> Result<Vec<Value>, GenerationError> {
    if k <= 0 {
        return Err(GenerationError::InvalidSampleSize(format!(
            "sample size must be positive, got {k}"
        )));
    }
    if k as usize > source.len() {
        return Err(GenerationError::InvalidSampleSize(format!(
            "sample size {k} exceeds source size {}",
            source.len()
        )));
    }
    let indices = engine.permutation(source.len(), k as usize)?;
    Ok(indices.into_iter().map(|i| source[i].clone()).collect())
}

/// A backing string with commas is a literal value list; a single token
/// is a file path read line by line.
fn parse_backing(raw: &str) -> Result<Vec<Value>, GenerationError> {
    let tokens: Vec<&str> = raw.split(',').collect();
    if tokens.len() > 1 {
        return Ok(tokens.iter().map(|token| Value::from(*token)).collect());
    }
    let path = Path::new(raw);
    if path.is_dir() {
        return Err(GenerationError::InvalidPath(path.to_path_buf()));
    }
    if !path.exists() {
        return Err(GenerationError::PathNotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    Ok(contents.lines().map(Value::from).collect())
}
