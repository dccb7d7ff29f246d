use ng_core::errors::{ErrorInfo, NgError};
use ng_core::RngHandle;
use ng_graph::{Edit, EditLimits, EdgeId};
use rand::RngCore;
use tracing::trace;

use crate::strategy::{MoveStrategy, StepContext};

/// Unweighted strategy: checkerboard swaps on binary matrices.
///
/// Picks a present free edge `a->b`, an absent free cell `a->d`, and a present
/// free edge `c->d` with `c != a`. When `c->b` is absent and free the swap
/// moves both edges to the opposite corners of the rectangle.
///
/// Valid swaps are always accepted, with no Hastings correction. The
/// proposal is not symmetric: with `E` free present edges, `N_x` absent free
/// cells in row `x` and `K_y` present free cells in column `y`, a rectangle
/// is proposed with probability `(1 / (N_a * K_d) + 1 / (N_c * K_b)) / E`
/// and its reverse with `(1 / (N_a * K_b) + 1 / (N_c * K_d)) / E`. The chain
/// is only uniform over feasible binary matrices when those counts balance,
/// as in regular instances.
#[derive(Debug)]
pub struct SwapMoves;

fn pick(ids: &[EdgeId], rng: &mut RngHandle) -> Option<EdgeId> {
    if ids.is_empty() {
        return None;
    }
    Some(ids[(rng.next_u64() as usize) % ids.len()])
}

fn rigid(code: &str, message: &str) -> NgError {
    NgError::Rigid(ErrorInfo::new(code, message))
}

impl MoveStrategy for SwapMoves {
    fn name(&self) -> &'static str {
        "checkerboard-swap"
    }

    fn requires_binary(&self) -> bool {
        true
    }

    fn limits(&self) -> EditLimits {
        EditLimits { ceiling: Some(1) }
    }

    fn propose(&mut self, ctx: &StepContext<'_>, rng: &mut RngHandle) -> Result<Edit, NgError> {
        let view = ctx.view;
        let first = pick(view.free_present_edges(), rng)
            .ok_or_else(|| rigid("no-free-edges", "no present edge is free to move"))?;
        let (a, b) = (view.edge(first).tail(), view.edge(first).head());

        let target = pick(view.vertex(a).not_out_edges(), rng)
            .ok_or_else(|| rigid("no-open-cell", "tail vertex has no absent free cell"))?;
        let d = view.edge(target).head();

        let partners: Vec<EdgeId> = view
            .vertex(d)
            .in_edges()
            .iter()
            .copied()
            .filter(|id| {
                let edge = view.edge(*id);
                !edge.is_fixed() && edge.tail() != a
            })
            .collect();
        let second = pick(&partners, rng)
            .ok_or_else(|| rigid("no-partner-edge", "no free edge enters the chosen head"))?;
        let c = view.edge(second).tail();

        let closing = view
            .edge_at(c, b)
            .map(|id| view.edge(id))
            .filter(|edge| !edge.is_fixed() && edge.weight(ctx.matrix) == 0);
        if closing.is_none() {
            return Err(rigid(
                "blocked-corner",
                "closing cell is present, fixed or disallowed",
            ));
        }
        trace!(a, b, c, d, "checkerboard swap proposed");
        Ok(Edit::rectangle(a, d, c, b, 1))
    }

    fn validate(&self, ctx: &StepContext<'_>, edit: &Edit) -> bool {
        edit.deltas.len() == 4
            && edit.deltas.iter().all(|cell| cell.delta.abs() == 1)
            && ctx.admits(self.limits(), edit)
    }
}
