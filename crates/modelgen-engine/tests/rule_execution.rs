use modelgen_core::{AnnotationSet, AnnotationValue, Value};
use modelgen_engine::controller::{
    CandidateSource, CandidateTuple, IterSource, MatchPolicy, PatternRule,
    RuleExecutionController,
};
use modelgen_engine::errors::GenerationError;
use modelgen_engine::model::CancelToken;
use modelgen_engine::random::RandomEngine;

/// Rule matching every candidate whose first value is not the string "x",
/// counting action invocations.
struct CountingRule {
    annotations: AnnotationSet,
    matched: usize,
    rejected: usize,
}

impl CountingRule {
    fn new(annotations: AnnotationSet) -> Self {
        Self {
            annotations,
            matched: 0,
            rejected: 0,
        }
    }
}

impl PatternRule for CountingRule {
    fn name(&self) -> &str {
        "counting"
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    fn matches(&mut self, candidate: &CandidateTuple) -> Result<bool, GenerationError> {
        Ok(candidate.first() != Some(&Value::from("x")))
    }

    fn on_match(&mut self, _candidate: &CandidateTuple) -> Result<(), GenerationError> {
        self.matched += 1;
        Ok(())
    }

    fn on_no_match(&mut self, _candidate: &CandidateTuple) -> Result<(), GenerationError> {
        self.rejected += 1;
        Ok(())
    }
}

fn tuples(labels: &[&str]) -> Vec<CandidateTuple> {
    labels.iter().map(|label| vec![Value::from(*label)]).collect()
}

#[test]
fn match_bound_stops_the_scan_early() {
    let annotations = AnnotationSet::new().with("matches", AnnotationValue::Int(3));
    let mut rule = CountingRule::new(annotations);
    let mut source = IterSource::new(tuples(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]));

    let mut engine = RandomEngine::with_seed(91591);
    let fired = RuleExecutionController::new(&mut engine)
        .execute(&mut rule, &mut source)
        .expect("execute");

    assert_eq!(fired.len(), 3);
    assert_eq!(rule.matched, 3);
    // The scan stopped at the bound instead of draining the source.
    assert!(source.has_more());
}

#[test]
fn zero_probability_fires_nothing_but_drains_the_source() {
    let annotations = AnnotationSet::new().with("probability", AnnotationValue::Real(0.0));
    let mut rule = CountingRule::new(annotations);
    let mut source = IterSource::new(tuples(&["a", "b", "c", "d"]));

    let mut engine = RandomEngine::with_seed(91591);
    let fired = RuleExecutionController::new(&mut engine)
        .execute(&mut rule, &mut source)
        .expect("execute");

    assert!(fired.is_empty());
    assert_eq!(rule.matched, 0);
    assert!(!source.has_more());
}

#[test]
fn full_probability_fires_every_match() {
    let annotations = AnnotationSet::new().with("probability", AnnotationValue::Real(1.0));
    let mut rule = CountingRule::new(annotations);
    let mut source = IterSource::new(tuples(&["a", "b", "c"]));

    let mut engine = RandomEngine::with_seed(91591);
    let fired = RuleExecutionController::new(&mut engine)
        .execute(&mut rule, &mut source)
        .expect("execute");

    assert_eq!(fired.len(), 3);
}

#[test]
fn no_repeat_skips_already_matched_elements_without_consuming_slots() {
    let annotations = AnnotationSet::new()
        .with("noRepeat", AnnotationValue::Bool(true))
        .with("matches", AnnotationValue::Int(3));
    let mut rule = CountingRule::new(annotations);
    // "a" repeats twice after matching; the repeats must not count against
    // the bound, so "b" and "c" still fire.
    let mut source = IterSource::new(tuples(&["a", "a", "a", "b", "c"]));

    let mut engine = RandomEngine::with_seed(91591);
    let fired = RuleExecutionController::new(&mut engine)
        .execute(&mut rule, &mut source)
        .expect("execute");

    assert_eq!(fired.len(), 3);
    assert_eq!(
        fired,
        vec![
            vec![Value::from("a")],
            vec![Value::from("b")],
            vec![Value::from("c")]
        ]
    );
    assert_eq!(rule.matched, 3);
}

#[test]
fn non_matching_candidates_run_the_no_match_action() {
    let mut rule = CountingRule::new(AnnotationSet::new());
    let mut source = IterSource::new(tuples(&["a", "x", "b", "x"]));

    let mut engine = RandomEngine::with_seed(91591);
    let fired = RuleExecutionController::new(&mut engine)
        .execute(&mut rule, &mut source)
        .expect("execute");

    assert_eq!(fired.len(), 2);
    assert_eq!(rule.matched, 2);
    assert_eq!(rule.rejected, 2);
}

#[test]
fn range_bound_resolves_within_the_range() {
    for seed in 0..20 {
        let annotations =
            AnnotationSet::new().with("matches", AnnotationValue::Range(1, 3));
        let mut rule = CountingRule::new(annotations);
        let mut source =
            IterSource::new(tuples(&["a", "b", "c", "d", "e", "f", "g", "h"]));

        let mut engine = RandomEngine::with_seed(seed);
        let fired = RuleExecutionController::new(&mut engine)
            .execute(&mut rule, &mut source)
            .expect("execute");
        assert!((1..=3).contains(&fired.len()));
    }
}

#[test]
fn wrong_annotation_types_are_rejected() {
    let annotations =
        AnnotationSet::new().with("matches", AnnotationValue::Str("three".to_string()));
    let mut rule = CountingRule::new(annotations);
    let mut source = IterSource::new(tuples(&["a"]));

    let mut engine = RandomEngine::with_seed(1);
    let result = RuleExecutionController::new(&mut engine).execute(&mut rule, &mut source);
    assert!(matches!(
        result,
        Err(GenerationError::InvalidAnnotation { .. })
    ));
}

#[test]
fn policy_defaults_are_unbounded_certain_and_repeating() {
    let mut engine = RandomEngine::with_seed(1);
    let policy = MatchPolicy::from_annotations(&AnnotationSet::new(), &mut engine)
        .expect("default policy");
    assert_eq!(policy.max_matches, None);
    assert_eq!(policy.probability, 1.0);
    assert!(!policy.no_repeat);
}

#[test]
fn negative_match_bound_clamps_to_zero() {
    let annotations = AnnotationSet::new().with("matches", AnnotationValue::Int(-5));
    let mut rule = CountingRule::new(annotations);
    let mut source = IterSource::new(tuples(&["a", "b"]));

    let mut engine = RandomEngine::with_seed(1);
    let fired = RuleExecutionController::new(&mut engine)
        .execute(&mut rule, &mut source)
        .expect("execute");
    assert!(fired.is_empty());
    assert!(source.has_more());
}

#[test]
fn cancellation_interrupts_the_scan() {
    let mut rule = CountingRule::new(AnnotationSet::new());
    let mut source = IterSource::new(tuples(&["a", "b", "c"]));

    let cancel = CancelToken::new();
    cancel.cancel();
    let mut engine = RandomEngine::with_seed(1);
    let result = RuleExecutionController::with_cancel(&mut engine, cancel)
        .execute(&mut rule, &mut source);
    assert!(matches!(result, Err(GenerationError::Cancelled)));
}

/// An endless stream of fresh single-value tuples.
struct EndlessSource {
    next: u64,
}

impl CandidateSource for EndlessSource {
    fn has_more(&mut self) -> bool {
        true
    }

    fn next_candidate(&mut self) -> Result<CandidateTuple, GenerationError> {
        self.next += 1;
        Ok(vec![Value::from(format!("c{}", self.next))])
    }
}

#[test]
fn match_bound_terminates_an_endless_stream() {
    let annotations = AnnotationSet::new().with("matches", AnnotationValue::Int(5));
    let mut rule = CountingRule::new(annotations);
    let mut source = EndlessSource { next: 0 };

    let mut engine = RandomEngine::with_seed(91591);
    let fired = RuleExecutionController::new(&mut engine)
        .execute(&mut rule, &mut source)
        .expect("execute");
    assert_eq!(fired.len(), 5);
}
