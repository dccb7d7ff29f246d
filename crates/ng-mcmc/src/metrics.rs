use indexmap::IndexSet;
use ng_core::IntMatrix;
use serde::{Deserialize, Serialize};

/// Outcome of one sampler step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The edit was applied.
    Accepted {
        /// Whether a cell crossed zero and the view was rebuilt.
        topology_changed: bool,
    },
    /// The edit failed validation; nothing changed.
    Rejected,
    /// No candidate edit existed; nothing changed.
    Rigid,
}

/// Counters accumulated over the sampler's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStats {
    /// Steps taken, burn-in included.
    pub steps: usize,
    /// Steps whose edit was applied.
    pub accepted: usize,
    /// Steps whose edit failed validation.
    pub rejected: usize,
    /// Steps with no candidate edit.
    pub rigid_steps: usize,
    /// View rebuilds caused by accepted edits.
    pub topology_rebuilds: usize,
    /// Matrices recorded across all runs.
    pub samples_recorded: usize,
    /// Distinct matrices among the recorded samples.
    pub unique_states: usize,
}

impl ChainStats {
    /// Accepted steps divided by all steps, or 0.0 before the first step.
    pub fn acceptance_rate(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.accepted as f64 / self.steps as f64
        }
    }
}

/// Collects step outcomes and sample coverage.
#[derive(Debug, Default)]
pub struct ChainRecorder {
    stats: ChainStats,
    unique_hashes: IndexSet<String>,
}

impl ChainRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one step.
    pub fn record_step(&mut self, outcome: StepOutcome) {
        self.stats.steps += 1;
        match outcome {
            StepOutcome::Accepted { topology_changed } => {
                self.stats.accepted += 1;
                if topology_changed {
                    self.stats.topology_rebuilds += 1;
                }
            }
            StepOutcome::Rejected => self.stats.rejected += 1,
            StepOutcome::Rigid => self.stats.rigid_steps += 1,
        }
    }

    /// Counts one recorded matrix.
    pub fn record_sample(&mut self, matrix: &IntMatrix) {
        self.stats.samples_recorded += 1;
        self.unique_hashes.insert(matrix.canonical_hash());
        self.stats.unique_states = self.unique_hashes.len();
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> &ChainStats {
        &self.stats
    }
}
