//! Generates a small random graph model: node creation rules feed a named
//! group, then a pattern rule wires probabilistic edges between node pairs.
//!
//! Usage: `generate_graph [--seed N] [--nodes N]`

use std::collections::HashMap;
use std::env;

use modelgen_core::{AnnotationSet, AnnotationValue, InstanceRef, Value};
use modelgen_engine::{
    CandidateTuple, CreationRule, GenerationError, GenerationRun, InstanceFactory, IterSource,
    PatternRule, RunOptions,
};
use tracing_subscriber::EnvFilter;

struct GraphFactory {
    next_id: u64,
}

impl InstanceFactory for GraphFactory {
    fn instantiate(
        &mut self,
        type_name: &str,
        _args: &[Value],
    ) -> Result<InstanceRef, GenerationError> {
        self.next_id += 1;
        Ok(InstanceRef {
            type_name: type_name.to_string(),
            id: self.next_id,
        })
    }

    fn initialize(
        &mut self,
        _type_name: &str,
        _instance: &InstanceRef,
    ) -> Result<(), GenerationError> {
        Ok(())
    }
}

struct EdgeRule {
    annotations: AnnotationSet,
    edges: Vec<(InstanceRef, InstanceRef)>,
}

impl PatternRule for EdgeRule {
    fn name(&self) -> &str {
        "edge"
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    fn matches(&mut self, candidate: &CandidateTuple) -> Result<bool, GenerationError> {
        // Distinct endpoints only; self-loops are rejected.
        Ok(candidate.first() != candidate.get(1))
    }

    fn on_match(&mut self, candidate: &CandidateTuple) -> Result<(), GenerationError> {
        if let (Some(Value::Ref(from)), Some(Value::Ref(to))) =
            (candidate.first(), candidate.get(1))
        {
            self.edges.push((from.clone(), to.clone()));
        }
        Ok(())
    }

    fn on_no_match(&mut self, _candidate: &CandidateTuple) -> Result<(), GenerationError> {
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut seed: i64 = 91591;
    let mut node_count: i64 = 8;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = args.next().ok_or("missing --seed value")?.parse()?,
            "--nodes" => node_count = args.next().ok_or("missing --nodes value")?.parse()?,
            _ => return Err("unexpected argument".into()),
        }
    }

    let bindings: HashMap<String, String> = HashMap::new();
    let mut run = GenerationRun::new(
        RunOptions {
            seed: Some(seed),
            ..RunOptions::default()
        },
        Box::new(bindings),
    );

    let node_rule = CreationRule::new(
        "Node",
        AnnotationSet::new()
            .with("instances", AnnotationValue::Int(node_count))
            .with("list", AnnotationValue::Str("nodes".to_string())),
    );
    let mut factory = GraphFactory { next_id: 0 };
    let nodes = run.create_instances(&node_rule, &mut factory)?;

    let mut labels = Vec::with_capacity(nodes.len());
    for node in &nodes {
        let length = run.engine().int_between(4, 10)? as usize;
        let label = run
            .values()
            .capitalized_word(modelgen_core::CharacterSet::Letter, length)?;
        labels.push((node.clone(), label));
    }

    let pool = run.list_values("nodes")?;
    let pairs: Vec<CandidateTuple> = pool
        .iter()
        .flat_map(|from| pool.iter().map(move |to| vec![from.clone(), to.clone()]))
        .collect();

    let mut edge_rule = EdgeRule {
        annotations: AnnotationSet::new()
            .with("probability", AnnotationValue::Real(0.3))
            .with("noRepeat", AnnotationValue::Bool(false)),
        edges: Vec::new(),
    };
    let mut source = IterSource::new(pairs);
    run.execute_pattern(&mut edge_rule, &mut source)?;

    for (node, label) in &labels {
        println!("node {}#{} {label}", node.type_name, node.id);
    }
    for (from, to) in &edge_rule.edges {
        println!("edge {}#{} -> {}#{}", from.type_name, from.id, to.type_name, to.id);
    }

    let report = run.finish();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
