use std::collections::BTreeMap;

use ng_core::errors::{ErrorInfo, NgError};
use ng_core::IntMatrix;
use serde::{Deserialize, Serialize};

use crate::flags::StructureConfig;

/// Signed change applied to one matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDelta {
    /// Row of the cell.
    pub row: usize,
    /// Column of the cell.
    pub col: usize,
    /// Amount added to the cell.
    pub delta: i64,
}

/// Coordinated multi-cell change proposed by a sampler step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Edit {
    /// Cell changes; each cell appears at most once.
    pub deltas: Vec<CellDelta>,
}

impl Edit {
    /// Creates an edit from its cell changes.
    pub fn new(deltas: Vec<CellDelta>) -> Self {
        Self { deltas }
    }

    /// Checkerboard swap: `+delta` on `(a, b)` and `(c, d)`, `-delta` on `(a, d)` and `(c, b)`.
    pub fn rectangle(a: usize, b: usize, c: usize, d: usize, delta: i64) -> Self {
        Self::new(vec![
            CellDelta {
                row: a,
                col: b,
                delta,
            },
            CellDelta {
                row: c,
                col: d,
                delta,
            },
            CellDelta {
                row: a,
                col: d,
                delta: -delta,
            },
            CellDelta {
                row: c,
                col: b,
                delta: -delta,
            },
        ])
    }

    /// Whether the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        self.deltas.iter().all(|cell| cell.delta == 0)
    }
}

/// Limits an edit must respect beyond degree and fixed-cell preservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditLimits {
    /// Largest value any touched cell may reach (`Some(1)` keeps matrices binary).
    pub ceiling: Option<i64>,
}

/// Result of applying an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    /// Whether a cell went from zero to positive or from positive to zero.
    pub topology_changed: bool,
}

/// Outcome of validating an edit without mutating the matrix.
#[derive(Debug)]
pub enum EditDryRun {
    /// The edit would succeed.
    Valid {
        /// Whether applying it would add or remove an edge.
        topology_changed: bool,
    },
    /// The edit would fail with the provided error.
    Invalid(NgError),
}

/// Applies `edit` to `matrix` after checking that it keeps every row and
/// column sum, leaves fixed and disallowed cells alone and keeps cells within
/// `[0, ceiling]`. The matrix is untouched when the edit is rejected.
pub fn apply_edit(
    matrix: &mut IntMatrix,
    fixed: &IntMatrix,
    structure: &StructureConfig,
    limits: EditLimits,
    edit: &Edit,
) -> Result<EditOutcome, NgError> {
    let topology_changed = check_edit(matrix, fixed, structure, limits, edit)?;
    for cell in &edit.deltas {
        matrix.add(cell.row, cell.col, cell.delta);
    }
    Ok(EditOutcome { topology_changed })
}

/// Validator for [`apply_edit`].
pub fn apply_edit_dry_run(
    matrix: &IntMatrix,
    fixed: &IntMatrix,
    structure: &StructureConfig,
    limits: EditLimits,
    edit: &Edit,
) -> EditDryRun {
    match check_edit(matrix, fixed, structure, limits, edit) {
        Ok(topology_changed) => EditDryRun::Valid { topology_changed },
        Err(err) => EditDryRun::Invalid(err),
    }
}

fn check_edit(
    matrix: &IntMatrix,
    fixed: &IntMatrix,
    structure: &StructureConfig,
    limits: EditLimits,
    edit: &Edit,
) -> Result<bool, NgError> {
    let shape = matrix.shape();
    let mut row_balance: BTreeMap<usize, i64> = BTreeMap::new();
    let mut col_balance: BTreeMap<usize, i64> = BTreeMap::new();
    let mut seen = Vec::with_capacity(edit.deltas.len());
    let mut topology_changed = false;

    for cell in &edit.deltas {
        if cell.row >= shape.0 || cell.col >= shape.1 {
            return Err(edit_error(
                "edit-out-of-bounds",
                "edit touches a cell outside the matrix",
                cell,
            ));
        }
        if seen.contains(&(cell.row, cell.col)) {
            return Err(edit_error(
                "edit-duplicate-cell",
                "edit touches a cell twice",
                cell,
            ));
        }
        seen.push((cell.row, cell.col));
        if cell.delta == 0 {
            continue;
        }
        if fixed.get(cell.row, cell.col) == 1 {
            return Err(edit_error("edit-fixed-cell", "edit touches a fixed cell", cell));
        }
        if !structure.is_eligible(shape, cell.row, cell.col) {
            return Err(edit_error(
                "edit-ineligible-cell",
                "edit touches a structurally disallowed cell",
                cell,
            ));
        }
        let before = matrix.get(cell.row, cell.col);
        let after = before + cell.delta;
        if after < 0 {
            return Err(edit_error(
                "edit-negative-cell",
                "edit drives a cell negative",
                cell,
            ));
        }
        if limits.ceiling.is_some_and(|ceiling| after > ceiling) {
            return Err(edit_error(
                "edit-above-ceiling",
                "edit exceeds the cell ceiling",
                cell,
            ));
        }
        topology_changed |= (before == 0) != (after == 0);
        *row_balance.entry(cell.row).or_insert(0) += cell.delta;
        *col_balance.entry(cell.col).or_insert(0) += cell.delta;
    }

    if let Some((row, _)) = row_balance.iter().find(|(_, balance)| **balance != 0) {
        return Err(NgError::InputRange(
            ErrorInfo::new("edit-row-margin", "edit changes a row sum")
                .with_context("row", row.to_string()),
        ));
    }
    if let Some((col, _)) = col_balance.iter().find(|(_, balance)| **balance != 0) {
        return Err(NgError::InputRange(
            ErrorInfo::new("edit-col-margin", "edit changes a column sum")
                .with_context("col", col.to_string()),
        ));
    }
    Ok(topology_changed)
}

fn edit_error(code: &str, message: &str, cell: &CellDelta) -> NgError {
    NgError::InputRange(
        ErrorInfo::new(code, message)
            .with_context("row", cell.row.to_string())
            .with_context("col", cell.col.to_string())
            .with_context("delta", cell.delta.to_string()),
    )
}
