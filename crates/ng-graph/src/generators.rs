use ng_core::errors::{ErrorInfo, NgError};
use ng_core::{IntMatrix, RngHandle};
use rand::Rng;

use crate::flags::StructureConfig;

/// Random feasible constructor input together with the matrix it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedInstance {
    /// Row sums of `witness`.
    pub out_degree: Vec<i64>,
    /// Column sums of `witness`.
    pub in_degree: Vec<i64>,
    /// Fixed pattern; only cells present in `witness` are pinned.
    pub fixed: IntMatrix,
    /// Binary matrix proving the instance is feasible.
    pub witness: IntMatrix,
}

/// Draws a random binary matrix and derives a feasible instance from it.
///
/// Every eligible cell is present with probability `density`; every present
/// cell is pinned with probability `fixed_fraction`.
pub fn gen_feasible_instance(
    rows: usize,
    cols: usize,
    density: f64,
    fixed_fraction: f64,
    structure: &StructureConfig,
    rng: &mut RngHandle,
) -> Result<GeneratedInstance, NgError> {
    if rows == 0 || cols == 0 {
        return Err(NgError::InputShape(
            ErrorInfo::new("empty-instance", "instance generator requires a non-empty shape")
                .with_context("rows", rows.to_string())
                .with_context("cols", cols.to_string()),
        ));
    }
    for (label, value) in [("density", density), ("fixed_fraction", fixed_fraction)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(NgError::InputRange(
                ErrorInfo::new("probability-range", "probabilities must lie in [0, 1]")
                    .with_context(label, value.to_string()),
            ));
        }
    }

    let mut witness = IntMatrix::zeros(rows, cols);
    let mut fixed = IntMatrix::zeros(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            if !structure.is_eligible((rows, cols), row, col) || !rng.gen_bool(density) {
                continue;
            }
            witness.set(row, col, 1);
            if rng.gen_bool(fixed_fraction) {
                fixed.set(row, col, 1);
            }
        }
    }
    Ok(GeneratedInstance {
        out_degree: witness.row_sums(),
        in_degree: witness.col_sums(),
        fixed,
        witness,
    })
}
