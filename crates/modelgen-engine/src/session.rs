use tracing::info;

use modelgen_core::Value;

use crate::controller::{CandidateSource, CandidateTuple, PatternRule, RuleExecutionController};
use crate::errors::GenerationError;
use crate::lists::{ListBindings, ListResolver, NamedGroups};
use crate::model::{CancelToken, RunOptions, RunReport};
use crate::planner::{CreationRule, InstanceCreationPlanner, InstanceFactory};
use crate::random::RandomEngine;
use crate::values::ValueGenerator;
use modelgen_core::InstanceRef;

/// One generation run: a single draw stream, the list resolver, and the
/// named instance groups, alive for the duration of the run.
///
/// The driver executes every creation rule first, then every pattern
/// rule; rule bodies reach back in through the value and list operations.
/// Single-threaded: parallel workers would each need their own
/// independently seeded run.
pub struct GenerationRun {
    engine: RandomEngine,
    lists: ListResolver,
    groups: NamedGroups,
    cancel: CancelToken,
    report: RunReport,
}

impl GenerationRun {
    pub fn new(options: RunOptions, bindings: Box<dyn ListBindings>) -> Self {
        let engine = match options.seed {
            Some(seed) => RandomEngine::with_seed(seed),
            None => RandomEngine::from_entropy(),
        };
        info!(
            seed = options.seed,
            refill = options.refill_samples,
            "generation run started"
        );
        Self {
            engine,
            lists: ListResolver::new(bindings, options.refill_samples),
            groups: NamedGroups::new(),
            cancel: options.cancel,
            report: RunReport {
                seed: options.seed,
                ..RunReport::default()
            },
        }
    }

    pub fn engine(&mut self) -> &mut RandomEngine {
        &mut self.engine
    }

    /// Constrained value generation over this run's draw stream.
    pub fn values(&mut self) -> ValueGenerator<'_> {
        ValueGenerator::new(&mut self.engine)
    }

    pub fn groups(&self) -> &NamedGroups {
        &self.groups
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The values backing a list id, group backing first.
    pub fn list_values(&mut self, list_id: &str) -> Result<Vec<Value>, GenerationError> {
        Ok(self.lists.resolved(list_id, &self.groups)?.to_vec())
    }

    /// Uniform draw from a named list; `None` when the list is empty.
    pub fn next_from_list(&mut self, list_id: &str) -> Result<Option<Value>, GenerationError> {
        self.lists.next_from(&mut self.engine, list_id, &self.groups)
    }

    /// Without-replacement draw from a named list.
    pub fn next_from_list_as_sample(&mut self, list_id: &str) -> Result<Value, GenerationError> {
        self.lists
            .next_as_sample(&mut self.engine, list_id, &self.groups)
    }

    /// One-shot sample of `k` distinct elements from a named list.
    pub fn sample_from_list(
        &mut self,
        list_id: &str,
        k: i64,
    ) -> Result<Vec<Value>, GenerationError> {
        self.lists
            .sample_from(&mut self.engine, list_id, k, &self.groups)
    }

    /// Runs one creation rule, recording created instances in the report.
    pub fn create_instances(
        &mut self,
        rule: &CreationRule,
        factory: &mut dyn InstanceFactory,
    ) -> Result<Vec<InstanceRef>, GenerationError> {
        let mut planner = InstanceCreationPlanner::new(&mut self.engine);
        let created = planner.execute(rule, factory, &mut self.groups)?;
        self.report.instances_created += created.len() as u64;
        Ok(created)
    }

    /// Runs one pattern rule over the given candidate stream.
    pub fn execute_pattern(
        &mut self,
        rule: &mut dyn PatternRule,
        source: &mut dyn CandidateSource,
    ) -> Result<Vec<CandidateTuple>, GenerationError> {
        let mut controller =
            RuleExecutionController::with_cancel(&mut self.engine, self.cancel.clone());
        let fired = controller.execute(rule, source)?;
        self.report.patterns_executed += 1;
        self.report.matches_fired += fired.len() as u64;
        Ok(fired)
    }

    /// Finishes the run and returns its report.
    pub fn finish(mut self) -> RunReport {
        self.report.groups = self.groups.sizes();
        info!(
            instances = self.report.instances_created,
            patterns = self.report.patterns_executed,
            matches = self.report.matches_fired,
            "generation run finished"
        );
        self.report
    }
}
