use std::fmt::Write as _;

use ng_core::errors::{ErrorInfo, NgError};
use ng_core::{IntMatrix, RngHandle};
use ng_graph::diagnostics::{format_matrix, format_vertex};
use ng_graph::{
    apply_edit, check_seed_matrix, CycleScratch, CycleTracker, GraphView, StructureConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{check_sample_params, SampleConfig, SamplerVariant};
use crate::metrics::{ChainRecorder, ChainStats, StepOutcome};
use crate::moves_cycle::CycleMoves;
use crate::moves_swap::SwapMoves;
use crate::strategy::{MoveStrategy, StepContext};

/// Lifecycle of a sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplerPhase {
    /// Constructed, no steps taken.
    #[default]
    Idle,
    /// Running discarded steps.
    BurnIn,
    /// Recording samples.
    Sampling,
    /// Last requested run finished.
    Done,
}

/// Matrices recorded by [`Sampler::sample`] together with chain diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRun {
    /// Snapshots taken after every `thin`-th post burn-in step.
    pub samples: Vec<IntMatrix>,
    /// Lifetime acceptance rate.
    pub mixing: f64,
    /// Lifetime counters.
    pub stats: ChainStats,
}

/// Markov chain over matrices sharing row sums, column sums and fixed cells.
#[derive(Debug)]
pub struct Sampler<S: MoveStrategy> {
    matrix: IntMatrix,
    fixed: IntMatrix,
    structure: StructureConfig,
    view: GraphView,
    strategy: S,
    rng: RngHandle,
    phase: SamplerPhase,
    recorder: ChainRecorder,
}

/// Integer-weighted sampler driven by alternating-cycle shifts.
pub type WeightedGraph = Sampler<CycleMoves>;

/// Binary sampler driven by checkerboard swaps.
pub type UnweightedGraph = Sampler<SwapMoves>;

impl Sampler<CycleMoves> {
    /// Seeds a weighted sampler; `matrix` must be non-negative.
    pub fn new(
        matrix: IntMatrix,
        fixed: IntMatrix,
        structure: StructureConfig,
        seed: u64,
    ) -> Result<Self, NgError> {
        Self::with_strategy(matrix, fixed, structure, seed, CycleMoves::default())
    }
}

impl Sampler<SwapMoves> {
    /// Seeds an unweighted sampler; `matrix` must be binary.
    pub fn new(
        matrix: IntMatrix,
        fixed: IntMatrix,
        structure: StructureConfig,
        seed: u64,
    ) -> Result<Self, NgError> {
        Self::with_strategy(matrix, fixed, structure, seed, SwapMoves)
    }
}

impl<S: MoveStrategy> Sampler<S> {
    /// Seeds a sampler with an arbitrary move strategy.
    pub fn with_strategy(
        matrix: IntMatrix,
        fixed: IntMatrix,
        structure: StructureConfig,
        seed: u64,
        strategy: S,
    ) -> Result<Self, NgError> {
        check_seed_matrix(&matrix, &fixed, &structure, strategy.requires_binary())?;
        let view = GraphView::build(&matrix, &fixed, &structure);
        debug!(
            rows = matrix.rows(),
            cols = matrix.cols(),
            strategy = strategy.name(),
            seed,
            "sampler seeded"
        );
        Ok(Self {
            matrix,
            fixed,
            structure,
            view,
            strategy,
            rng: RngHandle::from_seed(seed),
            phase: SamplerPhase::Idle,
            recorder: ChainRecorder::new(),
        })
    }

    /// Runs `burnin` discarded steps, then records `nsamples` matrices taken
    /// every `thin` steps.
    pub fn sample(
        &mut self,
        nsamples: usize,
        thin: usize,
        burnin: usize,
    ) -> Result<SampleRun, NgError> {
        check_sample_params(nsamples, thin)?;

        self.phase = SamplerPhase::BurnIn;
        for _ in 0..burnin {
            self.sample_step()?;
        }

        self.phase = SamplerPhase::Sampling;
        let mut samples = Vec::with_capacity(nsamples);
        for _ in 0..nsamples {
            for _ in 0..thin {
                self.sample_step()?;
            }
            self.recorder.record_sample(&self.matrix);
            samples.push(self.matrix.clone());
        }

        self.phase = SamplerPhase::Done;
        let stats = self.recorder.stats().clone();
        debug!(
            nsamples,
            thin,
            burnin,
            accepted = stats.accepted,
            rigid = stats.rigid_steps,
            unique = stats.unique_states,
            "sampling finished"
        );
        Ok(SampleRun {
            samples,
            mixing: stats.acceptance_rate(),
            stats,
        })
    }

    /// Performs one proposal/validate/apply cycle.
    ///
    /// Rigid and rejected steps leave the matrix and the view untouched.
    pub fn sample_step(&mut self) -> Result<StepOutcome, NgError> {
        let ctx = StepContext {
            matrix: &self.matrix,
            fixed: &self.fixed,
            structure: &self.structure,
            view: &self.view,
        };
        let edit = match self.strategy.propose(&ctx, &mut self.rng) {
            Ok(edit) => edit,
            Err(NgError::Rigid(info)) => {
                trace!(code = %info.code, "rigid step");
                self.recorder.record_step(StepOutcome::Rigid);
                return Ok(StepOutcome::Rigid);
            }
            Err(err) => return Err(err),
        };
        if !self.strategy.validate(&ctx, &edit) {
            self.recorder.record_step(StepOutcome::Rejected);
            return Ok(StepOutcome::Rejected);
        }

        let limits = self.strategy.limits();
        let applied = apply_edit(&mut self.matrix, &self.fixed, &self.structure, limits, &edit);
        let outcome = match applied {
            Ok(applied) => {
                if applied.topology_changed {
                    self.view = GraphView::build(&self.matrix, &self.fixed, &self.structure);
                }
                StepOutcome::Accepted {
                    topology_changed: applied.topology_changed,
                }
            }
            Err(err) => {
                trace!(error = %err, "edit rejected by matrix check");
                StepOutcome::Rejected
            }
        };
        self.recorder.record_step(outcome);
        Ok(outcome)
    }

    /// Lifetime acceptance rate.
    pub fn mixing(&self) -> f64 {
        self.recorder.stats().acceptance_rate()
    }

    /// Current adjacency matrix.
    pub fn adjacency_matrix(&self) -> &IntMatrix {
        &self.matrix
    }

    /// Fixed pattern supplied at construction.
    pub fn fixed(&self) -> &IntMatrix {
        &self.fixed
    }

    /// Structural options supplied at construction.
    pub fn structure(&self) -> &StructureConfig {
        &self.structure
    }

    /// Current edge/vertex view.
    pub fn view(&self) -> &GraphView {
        &self.view
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SamplerPhase {
        self.phase
    }

    /// Lifetime counters.
    pub fn stats(&self) -> &ChainStats {
        self.recorder.stats()
    }

    /// Move strategy driving the chain.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Human readable state dump: counters, matrix and per-vertex lists with
    /// cycle data from a fresh full traversal.
    pub fn summary(&self) -> String {
        let stats = self.recorder.stats();
        let (rows, cols) = self.matrix.shape();
        let mut out = String::new();
        let _ = writeln!(out, "strategy: {}", self.strategy.name());
        let _ = writeln!(out, "shape: {rows}x{cols}");
        let _ = writeln!(out, "phase: {:?}", self.phase);
        let _ = writeln!(
            out,
            "steps: {} accepted: {} rejected: {} rigid: {}",
            stats.steps, stats.accepted, stats.rejected, stats.rigid_steps
        );
        let _ = writeln!(out, "mixing: {:.4}", self.mixing());
        let _ = writeln!(out, "adjacency:");
        out.push_str(&format_matrix(&self.matrix));
        let _ = writeln!(out, "fixed:");
        out.push_str(&format_matrix(&self.fixed));

        let mut scratch = CycleScratch::new();
        CycleTracker::new(&self.view, &self.matrix).trace_all(&mut scratch, None, |_| false);
        for index in 0..self.view.vertices().len() {
            out.push_str(&format_vertex(&self.view, &self.matrix, index, Some(&scratch)));
        }
        out
    }
}

/// Serializable record of a configured run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Strategy that drove the chain.
    pub variant: SamplerVariant,
    /// Matrix shape `(rows, cols)`.
    pub shape: (usize, usize),
    /// Seed of the random stream.
    pub seed: u64,
    /// Label copied from the seed policy.
    pub label: Option<String>,
    /// Requested sample count.
    pub nsamples: usize,
    /// Requested thinning interval.
    pub thin: usize,
    /// Requested burn-in length.
    pub burnin: usize,
    /// Lifetime acceptance rate.
    pub mixing: f64,
    /// Lifetime counters.
    pub stats: ChainStats,
    /// Canonical hash of the last matrix.
    pub final_hash: String,
}

impl RunSummary {
    /// Pretty-printed JSON rendering.
    pub fn to_json_pretty(&self) -> Result<String, NgError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| NgError::Serde(ErrorInfo::new("summary-serialize", err.to_string())))
    }
}

/// Samples and summary produced by [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    /// Recorded matrices.
    pub samples: Vec<IntMatrix>,
    /// Run record.
    pub summary: RunSummary,
}

/// Seeds the configured sampler variant with `matrix` and runs it once.
pub fn run(
    config: &SampleConfig,
    matrix: IntMatrix,
    fixed: IntMatrix,
) -> Result<RunOutput, NgError> {
    config.validate()?;
    let seed = config.seed_policy.master_seed;
    let shape = matrix.shape();
    let sample_run = match config.variant {
        SamplerVariant::Weighted => {
            WeightedGraph::new(matrix, fixed, config.structure, seed)?.sample(
                config.nsamples,
                config.thin,
                config.burnin,
            )?
        }
        SamplerVariant::Unweighted => {
            UnweightedGraph::new(matrix, fixed, config.structure, seed)?.sample(
                config.nsamples,
                config.thin,
                config.burnin,
            )?
        }
    };
    let final_hash = sample_run
        .samples
        .last()
        .map(IntMatrix::canonical_hash)
        .unwrap_or_default();
    Ok(RunOutput {
        summary: RunSummary {
            variant: config.variant,
            shape,
            seed,
            label: config.seed_policy.label.clone(),
            nsamples: config.nsamples,
            thin: config.thin,
            burnin: config.burnin,
            mixing: sample_run.mixing,
            stats: sample_run.stats,
            final_hash,
        },
        samples: sample_run.samples,
    })
}
