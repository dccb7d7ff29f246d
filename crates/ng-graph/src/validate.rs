use ng_core::errors::{ErrorInfo, NgError};
use ng_core::IntMatrix;

use crate::flags::StructureConfig;

/// Validates constructor inputs before any flow work begins.
///
/// Rows of `fixed` correspond to `out_degree`, columns to `in_degree`.
pub fn check_inputs(
    out_degree: &[i64],
    in_degree: &[i64],
    fixed: &IntMatrix,
    structure: &StructureConfig,
) -> Result<(), NgError> {
    if out_degree.len() != fixed.rows() || in_degree.len() != fixed.cols() {
        return Err(NgError::InputShape(
            ErrorInfo::new(
                "degree-shape",
                "degree vectors and fixed matrix have incompatible dimensions",
            )
            .with_context("out_degree_len", out_degree.len().to_string())
            .with_context("in_degree_len", in_degree.len().to_string())
            .with_context("fixed_rows", fixed.rows().to_string())
            .with_context("fixed_cols", fixed.cols().to_string()),
        ));
    }
    check_non_negative("out_degree", out_degree)?;
    check_non_negative("in_degree", in_degree)?;
    check_fixed(fixed, structure)
}

/// Validates a seed matrix handed to a sampler together with its fixed pattern.
pub fn check_seed_matrix(
    matrix: &IntMatrix,
    fixed: &IntMatrix,
    structure: &StructureConfig,
    require_binary: bool,
) -> Result<(), NgError> {
    if matrix.shape() != fixed.shape() {
        return Err(NgError::InputShape(
            ErrorInfo::new("fixed-shape", "adjacency and fixed matrices differ in shape")
                .with_context("adjacency", format!("{:?}", matrix.shape()))
                .with_context("fixed", format!("{:?}", fixed.shape())),
        ));
    }
    check_fixed(fixed, structure)?;
    let shape = matrix.shape();
    for row in 0..matrix.rows() {
        for (col, &value) in matrix.row(row).iter().enumerate() {
            if value < 0 {
                return Err(cell_error(
                    "negative-cell",
                    "adjacency matrix entries must be non-negative",
                    row,
                    col,
                    value,
                ));
            }
            if require_binary && value > 1 {
                return Err(cell_error(
                    "non-binary-cell",
                    "unweighted sampling requires a binary adjacency matrix",
                    row,
                    col,
                    value,
                ));
            }
            if value != 0 && !structure.is_eligible(shape, row, col) {
                return Err(cell_error(
                    "disallowed-cell",
                    "self loop present while self loops are disallowed",
                    row,
                    col,
                    value,
                ));
            }
        }
    }
    Ok(())
}

fn check_non_negative(label: &str, degrees: &[i64]) -> Result<(), NgError> {
    if let Some((index, value)) = degrees
        .iter()
        .copied()
        .enumerate()
        .find(|(_, value)| *value < 0)
    {
        return Err(NgError::InputRange(
            ErrorInfo::new("negative-degree", "degree vectors must be non-negative")
                .with_context("vector", label)
                .with_context("index", index.to_string())
                .with_context("value", value.to_string()),
        ));
    }
    Ok(())
}

fn check_fixed(fixed: &IntMatrix, structure: &StructureConfig) -> Result<(), NgError> {
    let shape = fixed.shape();
    for row in 0..fixed.rows() {
        for (col, &value) in fixed.row(row).iter().enumerate() {
            if value != 0 && value != 1 {
                return Err(cell_error(
                    "non-binary-fixed",
                    "all entries of the fixed matrix must be binary valued",
                    row,
                    col,
                    value,
                ));
            }
            if value == 1 && !structure.is_eligible(shape, row, col) {
                return Err(NgError::InputRange(
                    cell_info(
                        "fixed-disallowed-cell",
                        "a structurally disallowed cell cannot be fixed",
                        row,
                        col,
                        value,
                    )
                    .with_hint("allow self loops or clear the diagonal of the fixed matrix"),
                ));
            }
        }
    }
    Ok(())
}

fn cell_error(code: &str, message: &str, row: usize, col: usize, value: i64) -> NgError {
    NgError::InputRange(cell_info(code, message, row, col, value))
}

fn cell_info(code: &str, message: &str, row: usize, col: usize, value: i64) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("row", row.to_string())
        .with_context("col", col.to_string())
        .with_context("value", value.to_string())
}
