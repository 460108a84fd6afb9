use std::collections::HashSet;
use std::iter::Peekable;

use tracing::info;

use modelgen_core::{AnnotationSet, AnnotationValue, Value};

use crate::errors::GenerationError;
use crate::model::CancelToken;
use crate::random::RandomEngine;

/// Annotation bounding how many matches a pattern rule may fire.
pub const MATCHES_ANNOTATION: &str = "matches";
/// Annotation giving the probability of running the match action.
pub const PROBABILITY_ANNOTATION: &str = "probability";
/// Annotation suppressing re-firing on already-matched elements.
pub const NO_REPEAT_ANNOTATION: &str = "noRepeat";

/// An ordered collection of schema-instance references proposed by the
/// external enumerator for a rule to test.
pub type CandidateTuple = Vec<Value>;

/// The external combination generator, consumed in a pull loop.
pub trait CandidateSource {
    fn has_more(&mut self) -> bool;
    fn next_candidate(&mut self) -> Result<CandidateTuple, GenerationError>;
}

/// Adapter exposing any tuple iterator as a [`CandidateSource`].
pub struct IterSource<I: Iterator<Item = CandidateTuple>> {
    iter: Peekable<I>,
}

impl<I: Iterator<Item = CandidateTuple>> IterSource<I> {
    pub fn new(iter: impl IntoIterator<Item = CandidateTuple, IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter().peekable(),
        }
    }
}

impl<I: Iterator<Item = CandidateTuple>> CandidateSource for IterSource<I> {
    fn has_more(&mut self) -> bool {
        self.iter.peek().is_some()
    }

    fn next_candidate(&mut self) -> Result<CandidateTuple, GenerationError> {
        self.iter.next().ok_or_else(|| {
            GenerationError::InvalidRange("candidate source exhausted".to_string())
        })
    }
}

/// A declarative unit pairing a predicate over a candidate tuple with a
/// match action and a no-match action. Predicates and actions run in the
/// host's execution context; the engine only drives them.
pub trait PatternRule {
    fn name(&self) -> &str;
    fn annotations(&self) -> &AnnotationSet;
    fn matches(&mut self, candidate: &CandidateTuple) -> Result<bool, GenerationError>;
    fn on_match(&mut self, candidate: &CandidateTuple) -> Result<(), GenerationError>;
    fn on_no_match(&mut self, candidate: &CandidateTuple) -> Result<(), GenerationError>;
}

/// Per-invocation match policy derived from a rule's annotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    /// `None` means unbounded.
    pub max_matches: Option<u64>,
    pub probability: f64,
    pub no_repeat: bool,
}

impl MatchPolicy {
    /// Resolves the policy, drawing once from the engine when the match
    /// bound is a range.
    pub fn from_annotations(
        annotations: &AnnotationSet,
        engine: &mut RandomEngine,
    ) -> Result<Self, GenerationError> {
        let max_matches = match annotations.get(MATCHES_ANNOTATION) {
            None => None,
            Some(AnnotationValue::Int(value)) => Some((*value).max(0) as u64),
            Some(AnnotationValue::Range(lower, upper)) => {
                Some(engine.int_between(*lower, *upper)?.max(0) as u64)
            }
            Some(other) => {
                return Err(GenerationError::InvalidAnnotation {
                    name: MATCHES_ANNOTATION.to_string(),
                    reason: format!("expected an integer or a range, got {other:?}"),
                });
            }
        };
        let probability = match annotations.get(PROBABILITY_ANNOTATION) {
            None => 1.0,
            Some(AnnotationValue::Real(value)) => *value,
            Some(AnnotationValue::Int(value)) => *value as f64,
            Some(other) => {
                return Err(GenerationError::InvalidAnnotation {
                    name: PROBABILITY_ANNOTATION.to_string(),
                    reason: format!("expected a number, got {other:?}"),
                });
            }
        };
        Ok(Self {
            max_matches,
            probability,
            no_repeat: annotations.flag(NO_REPEAT_ANNOTATION),
        })
    }
}

/// Drives one pattern rule over an external candidate stream: probability
/// gating, no-repeat suppression, and match bounding.
pub struct RuleExecutionController<'a> {
    engine: &'a mut RandomEngine,
    cancel: CancelToken,
}

impl<'a> RuleExecutionController<'a> {
    pub fn new(engine: &'a mut RandomEngine) -> Self {
        Self {
            engine,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(engine: &'a mut RandomEngine, cancel: CancelToken) -> Self {
        Self { engine, cancel }
    }

    /// Runs one rule invocation to completion, returning the tuples whose
    /// match action fired, in firing order.
    ///
    /// Draw ordering is part of the reproducibility contract: the
    /// predicate is evaluated first and the probability draw happens only
    /// on a true predicate, so a non-matching candidate never consumes a
    /// draw. The match cache is confined to this invocation.
    pub fn execute(
        &mut self,
        rule: &mut dyn PatternRule,
        source: &mut dyn CandidateSource,
    ) -> Result<Vec<CandidateTuple>, GenerationError> {
        let policy = MatchPolicy::from_annotations(rule.annotations(), self.engine)?;
        let mut fired: Vec<CandidateTuple> = Vec::new();
        let mut cache: HashSet<String> = HashSet::new();
        let mut scanned = 0_u64;

        while source.has_more() && below_bound(fired.len(), policy.max_matches) {
            if self.cancel.is_cancelled() {
                return Err(GenerationError::Cancelled);
            }
            let candidate = source.next_candidate()?;
            scanned += 1;
            if policy.no_repeat && overlaps(&cache, &candidate) {
                continue;
            }
            if rule.matches(&candidate)? {
                if self.engine.next_real() < policy.probability {
                    rule.on_match(&candidate)?;
                    if policy.no_repeat {
                        for value in &candidate {
                            cache.insert(value.cache_key());
                        }
                    }
                    fired.push(candidate);
                }
            } else {
                rule.on_no_match(&candidate)?;
            }
        }

        info!(
            rule = rule.name(),
            scanned,
            matches = fired.len(),
            no_repeat = policy.no_repeat,
            "pattern rule executed"
        );
        Ok(fired)
    }
}

fn below_bound(fired: usize, max_matches: Option<u64>) -> bool {
    match max_matches {
        Some(max) => (fired as u64) < max,
        None => true,
    }
}

fn overlaps(cache: &HashSet<String>, candidate: &CandidateTuple) -> bool {
    candidate.iter().any(|value| cache.contains(&value.cache_key()))
}
