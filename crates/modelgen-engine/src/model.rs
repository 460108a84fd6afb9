use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

/// Cooperative cancellation flag checked inside the controller's scanning
/// loop, bounding runaway rules (unbounded match limits over an infinite
/// candidate stream).
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Run parameters. Seeds and configuration are run parameters, not files.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Engine seed; `None` seeds from process entropy.
    pub seed: Option<i64>,
    /// Whether exhausted sample cursors regenerate instead of failing.
    pub refill_samples: bool,
    pub cancel: CancelToken,
}

/// Summary of one generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub seed: Option<i64>,
    pub instances_created: u64,
    pub patterns_executed: u64,
    pub matches_fired: u64,
    /// Final size of every named instance group.
    pub groups: BTreeMap<String, u64>,
}
