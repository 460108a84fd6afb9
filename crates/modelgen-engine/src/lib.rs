//! Seeded synthetic model generation engine for Modelgen.
//!
//! This crate drives creation rules and pattern rules over a host schema
//! to produce reproducible synthetic instance models: one seeded draw
//! stream per run, constrained value generation, named value pools with
//! without-replacement sampling, and annotation-driven rule execution.

pub mod controller;
pub mod errors;
pub mod lists;
pub mod model;
pub mod planner;
pub mod random;
pub mod session;
pub mod values;

pub use controller::{
    CandidateSource, CandidateTuple, IterSource, MatchPolicy, PatternRule,
    RuleExecutionController,
};
pub use errors::GenerationError;
pub use lists::{ListBindings, ListResolver, NamedGroups, sample_without_replacement};
pub use model::{CancelToken, RunOptions, RunReport};
pub use planner::{CreationRule, CreationSpec, InstanceCreationPlanner, InstanceFactory};
pub use random::RandomEngine;
pub use session::GenerationRun;
pub use values::ValueGenerator;
