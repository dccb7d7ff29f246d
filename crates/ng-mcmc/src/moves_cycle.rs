use ng_core::errors::{ErrorInfo, NgError};
use ng_core::{IntMatrix, RngHandle};
use ng_graph::{CellDelta, CycleScratch, CycleTracker, Edit, Parity, TracedCycle};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::strategy::{MoveStrategy, StepContext};

/// Admissible non-zero shifts `[lower, -1] ∪ [1, upper]` along a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftRange {
    /// Most negative permitted shift (`<= 0`).
    pub lower: i64,
    /// Most positive permitted shift (`>= 0`).
    pub upper: i64,
}

impl ShiftRange {
    /// Number of non-zero shifts in the range.
    pub fn count(&self) -> u64 {
        self.upper.max(0).unsigned_abs() + self.lower.min(0).unsigned_abs()
    }

    /// Whether no non-zero shift is permitted.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Draws a non-zero shift uniformly, or `None` for an empty range.
    pub fn draw(&self, rng: &mut RngHandle) -> Option<i64> {
        let count = self.count();
        if count == 0 {
            return None;
        }
        let negatives = self.lower.min(0).unsigned_abs();
        let pick = rng.gen_range(0..count);
        let shift = if pick < negatives {
            self.lower + pick as i64
        } else {
            (pick - negatives) as i64 + 1
        };
        Some(shift)
    }
}

/// Decides which shifts a closed cycle admits.
pub trait CycleRule {
    /// Shift interval permitted along `cycle` for the current `matrix`.
    fn shift_range(&self, cycle: &TracedCycle, matrix: &IntMatrix) -> ShiftRange;
}

/// Permits a positive shift only when no odd step crosses a zero cell and a
/// negative shift only when no even step does.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroCrossingRule;

impl CycleRule for ZeroCrossingRule {
    fn shift_range(&self, cycle: &TracedCycle, matrix: &IntMatrix) -> ShiftRange {
        let upper = if cycle.up_zeros() == 0 {
            cycle.upper_bound(matrix)
        } else {
            0
        };
        let lower = if cycle.low_zeros() == 0 {
            -cycle.lower_bound(matrix)
        } else {
            0
        };
        ShiftRange { lower, upper }
    }
}

/// Weighted strategy: shifts integer weight around alternating cycles.
#[derive(Debug, Clone, Default)]
pub struct CycleMoves<R = ZeroCrossingRule> {
    rule: R,
    scratch: CycleScratch,
}

impl<R: CycleRule> CycleMoves<R> {
    /// Creates the strategy with a custom cycle rule.
    pub fn with_rule(rule: R) -> Self {
        Self {
            rule,
            scratch: CycleScratch::new(),
        }
    }

    /// Traversal scratch left by the most recent proposal.
    pub fn scratch(&self) -> &CycleScratch {
        &self.scratch
    }
}

impl<R: CycleRule> MoveStrategy for CycleMoves<R> {
    fn name(&self) -> &'static str {
        "cycle-shift"
    }

    fn propose(&mut self, ctx: &StepContext<'_>, rng: &mut RngHandle) -> Result<Edit, NgError> {
        let starts: Vec<usize> = (0..ctx.view.rows())
            .filter(|&row| !ctx.view.row_free_edges(row).is_empty())
            .collect();
        if starts.is_empty() {
            return Err(NgError::Rigid(ErrorInfo::new(
                "no-free-cells",
                "every eligible cell is fixed",
            )));
        }
        let start = starts[rng.gen_range(0..starts.len())];

        let tracker = CycleTracker::new(ctx.view, ctx.matrix);
        let rule = &self.rule;
        let report = tracker.trace_from(start, &mut self.scratch, Some(&mut *rng), |cycle| {
            !rule.shift_range(cycle, ctx.matrix).is_empty()
        });
        let Some(cycle) = report.selected else {
            return Err(NgError::Rigid(
                ErrorInfo::new("no-admissible-cycle", "no closed cycle admits a shift")
                    .with_context("start_row", start.to_string())
                    .with_context("closed_cycles", report.closed_cycles.to_string()),
            ));
        };

        let range = self.rule.shift_range(&cycle, ctx.matrix);
        let shift = range.draw(rng).ok_or_else(|| {
            NgError::Rigid(ErrorInfo::new("empty-shift-range", "cycle admits no shift"))
        })?;
        trace!(
            start,
            length = cycle.len(),
            lower = range.lower,
            upper = range.upper,
            shift,
            "cycle shift proposed"
        );
        Ok(shift_edit(&cycle, shift))
    }

    fn validate(&self, ctx: &StepContext<'_>, edit: &Edit) -> bool {
        edit.deltas.len() >= 4 && edit.deltas.len() % 2 == 0 && ctx.admits(self.limits(), edit)
    }
}

fn shift_edit(cycle: &TracedCycle, shift: i64) -> Edit {
    Edit::new(
        cycle
            .steps()
            .iter()
            .map(|step| CellDelta {
                row: step.row,
                col: step.col,
                delta: match step.parity {
                    Parity::Even => shift,
                    Parity::Odd => -shift,
                },
            })
            .collect(),
    )
}
