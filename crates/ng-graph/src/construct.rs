use ng_core::{IntMatrix, NgError};
use tracing::debug;

use crate::flags::StructureConfig;
use crate::flow::FlowNetwork;
use crate::validate::check_inputs;

/// Builds one matrix with the prescribed row sums (`out_degree`), column sums
/// (`in_degree`) and a 1 wherever `fixed` is 1.
///
/// Inputs are validated first (`InputShape`, `InputRange`); a combination
/// that admits no matrix fails with `Infeasible`. The augmenting-path search
/// runs until the residual network has no source-to-sink path left.
pub fn construct_graph(
    out_degree: &[i64],
    in_degree: &[i64],
    fixed: &IntMatrix,
    structure: &StructureConfig,
) -> Result<IntMatrix, NgError> {
    check_inputs(out_degree, in_degree, fixed, structure)?;
    let mut network = FlowNetwork::new(out_degree, in_degree, fixed, structure)?;
    let mut augmentations = 0usize;
    while network.find_path() {
        let amount = network.path_flow();
        network.update_flow(amount);
        augmentations += 1;
    }
    network.ensure_saturated()?;
    debug!(
        rows = fixed.rows(),
        cols = fixed.cols(),
        augmentations,
        flow = network.total_flow(),
        "constructed feasible matrix"
    );
    Ok(network.weight_matrix())
}
