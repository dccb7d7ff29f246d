#![deny(missing_docs)]

//! Markov-chain samplers over directed graphs with fixed degree sequences.
//!
//! One driver, [`Sampler`], owns the adjacency and fixed matrices and asks a
//! [`MoveStrategy`] for local edits. [`WeightedGraph`] shifts integer weight
//! around alternating cycles; [`UnweightedGraph`] performs checkerboard swaps
//! on binary matrices. Both preserve every row sum, column sum and fixed cell.

/// YAML configuration schema and defaults.
pub mod config;
/// Sampling driver and the configured `run` entry point.
pub mod kernel;
/// Step outcomes and lifetime chain counters.
pub mod metrics;
/// Alternating-cycle weight shifts.
pub mod moves_cycle;
/// Checkerboard swaps for binary matrices.
pub mod moves_swap;
/// Strategy trait consumed by the driver.
pub mod strategy;

pub use config::{SampleConfig, SamplerVariant, SeedPolicy};
pub use kernel::{
    run, RunOutput, RunSummary, SampleRun, Sampler, SamplerPhase, UnweightedGraph, WeightedGraph,
};
pub use metrics::{ChainRecorder, ChainStats, StepOutcome};
pub use moves_cycle::{CycleMoves, CycleRule, ShiftRange, ZeroCrossingRule};
pub use moves_swap::SwapMoves;
pub use strategy::{MoveStrategy, StepContext};
