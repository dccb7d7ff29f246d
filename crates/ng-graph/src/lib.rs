#![deny(missing_docs)]

//! Graph construction and traversal for constrained null-model sampling.
//!
//! [`construct_graph`] produces one matrix meeting prescribed degree
//! sequences and a fixed pattern via augmenting paths on a [`FlowNetwork`].
//! [`GraphView`] exposes edge/vertex lists aliasing the matrix, and
//! [`CycleTracker`] walks alternating cycles for the weighted sampler.

mod construct;
pub mod cycles;
pub mod diagnostics;
mod edit;
mod flags;
mod flow;
mod generators;
mod validate;
mod view;

pub use construct::construct_graph;
pub use cycles::{
    Color, CycleData, CycleScratch, CycleStep, CycleTracker, EdgeParity, Parity, TraceReport,
    TracedCycle,
};
pub use edit::{
    apply_edit, apply_edit_dry_run, CellDelta, Edit, EditDryRun, EditLimits, EditOutcome,
};
pub use flags::StructureConfig;
pub use flow::FlowNetwork;
pub use generators::{gen_feasible_instance, GeneratedInstance};
pub use validate::{check_inputs, check_seed_matrix};
pub use view::{Edge, EdgeId, GraphView, Vertex};
