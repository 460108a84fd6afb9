use tracing::info;

use modelgen_core::{AnnotationSet, AnnotationValue, InstanceRef, Value};

use crate::errors::GenerationError;
use crate::lists::NamedGroups;
use crate::random::RandomEngine;

/// Annotation giving how many instances to create.
pub const INSTANCES_ANNOTATION: &str = "instances";
/// Annotation naming the group the created instances are collected into.
pub const LIST_ANNOTATION: &str = "list";
/// Annotation carrying the constructor arguments.
pub const PARAMETERS_ANNOTATION: &str = "parameters";

/// A creation rule: the target type to instantiate plus its annotations.
#[derive(Debug, Clone)]
pub struct CreationRule {
    pub target_type: String,
    pub annotations: AnnotationSet,
}

impl CreationRule {
    pub fn new(target_type: impl Into<String>, annotations: AnnotationSet) -> Self {
        Self {
            target_type: target_type.into(),
            annotations,
        }
    }
}

/// The resolved plan for one creation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationSpec {
    pub count: u64,
    pub group_name: Option<String>,
    pub constructor_args: Vec<Value>,
}

/// The host's object-instantiation and attribute-assignment capability.
pub trait InstanceFactory {
    /// Returns a new instance of the named type.
    fn instantiate(
        &mut self,
        type_name: &str,
        args: &[Value],
    ) -> Result<InstanceRef, GenerationError>;

    /// Applies the creation rule's initializer body to the new instance.
    fn initialize(&mut self, type_name: &str, instance: &InstanceRef)
    -> Result<(), GenerationError>;
}

/// Turns per-rule annotations into instance creation: resolves the count,
/// instantiates, initializes, and collects into the named group.
pub struct InstanceCreationPlanner<'a> {
    engine: &'a mut RandomEngine,
}

impl<'a> InstanceCreationPlanner<'a> {
    pub fn new(engine: &'a mut RandomEngine) -> Self {
        Self { engine }
    }

    /// Resolves the creation spec, drawing once from the engine when the
    /// count is a range. Negative counts clamp to zero.
    pub fn plan(&mut self, rule: &CreationRule) -> Result<CreationSpec, GenerationError> {
        let count = match rule.annotations.get(INSTANCES_ANNOTATION) {
            None => 1,
            Some(AnnotationValue::Int(value)) => (*value).max(0) as u64,
            Some(AnnotationValue::Range(lower, upper)) => {
                self.engine.int_between(*lower, *upper)?.max(0) as u64
            }
            Some(other) => {
                return Err(GenerationError::InvalidAnnotation {
                    name: INSTANCES_ANNOTATION.to_string(),
                    reason: format!("expected an integer or a range, got {other:?}"),
                });
            }
        };
        let group_name = match rule.annotations.get(LIST_ANNOTATION) {
            None => None,
            Some(AnnotationValue::Str(name)) if name.is_empty() => None,
            Some(AnnotationValue::Str(name)) => Some(name.clone()),
            Some(other) => {
                return Err(GenerationError::InvalidAnnotation {
                    name: LIST_ANNOTATION.to_string(),
                    reason: format!("expected a string, got {other:?}"),
                });
            }
        };
        let constructor_args = match rule.annotations.get(PARAMETERS_ANNOTATION) {
            None => Vec::new(),
            Some(AnnotationValue::Args(args)) => args.clone(),
            Some(other) => {
                return Err(GenerationError::InvalidAnnotation {
                    name: PARAMETERS_ANNOTATION.to_string(),
                    reason: format!("expected an argument list, got {other:?}"),
                });
            }
        };
        Ok(CreationSpec {
            count,
            group_name,
            constructor_args,
        })
    }

    /// Plans and runs one creation rule. Every created instance is
    /// initialized and, when a group is named, appended to it so later
    /// list lookups resolve to these instances.
    pub fn execute(
        &mut self,
        rule: &CreationRule,
        factory: &mut dyn InstanceFactory,
        groups: &mut NamedGroups,
    ) -> Result<Vec<InstanceRef>, GenerationError> {
        let spec = self.plan(rule)?;
        let mut created = Vec::with_capacity(spec.count as usize);
        for _ in 0..spec.count {
            let instance = factory.instantiate(&rule.target_type, &spec.constructor_args)?;
            factory.initialize(&rule.target_type, &instance)?;
            if let Some(group) = &spec.group_name {
                groups.append(group, Value::Ref(instance.clone()));
            }
            created.push(instance);
        }
        info!(
            target = %rule.target_type,
            count = spec.count,
            group = spec.group_name.as_deref().unwrap_or(""),
            "creation rule executed"
        );
        Ok(created)
    }
}
