//! Alternating-cycle traversal with per-vertex zero-crossing bookkeeping.
//!
//! The traversal walks the bipartite structure of non-fixed eligible cells.
//! Leaving a row through cell `(i, j)` is an **even** step (the cell would be
//! incremented by a positive shift); leaving a column through `(i, j)` is an
//! **odd** step (the cell would be decremented). A zero-weight cell crossed by
//! an odd step blocks positive shifts (the upper marker crosses zero); a
//! zero-weight cell crossed by an even step blocks negative shifts (the lower
//! marker crosses zero).
//!
//! Every closed cycle alternates even and odd steps, so adding `+d` on the even
//! cells and `-d` on the odd cells keeps all row and column sums unchanged.

use ng_core::{IntMatrix, RngHandle};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::view::{EdgeId, GraphView};

/// Three-colour traversal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Not reached yet.
    #[default]
    White,
    /// On the current traversal path.
    Gray,
    /// Fully explored.
    Black,
}

/// Direction in which a traversal step crosses a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    /// Row to column; the cell gains the shift.
    Even,
    /// Column to row; the cell loses the shift.
    Odd,
}

/// Counters populated for one vertex side by the most recent traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CycleData {
    /// Arrivals at the vertex during the pass.
    pub visits: usize,
    /// Arrivals over an odd step through a zero cell.
    pub up_zero_visits: usize,
    /// Arrivals over an even step through a zero cell.
    pub low_zero_visits: usize,
    /// Odd zero steps on the traversal path at discovery.
    pub up_zeros: usize,
    /// Even zero steps on the traversal path at discovery.
    pub low_zeros: usize,
}

/// How often a cell was crossed in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeParity {
    /// Even crossings.
    pub even: usize,
    /// Odd crossings.
    pub odd: usize,
}

/// Caller-owned scratch space, reset at the start of every traversal.
///
/// Slots `0..rows` describe the tail (row) side of each vertex and slots
/// `rows..rows + cols` the head (column) side.
#[derive(Debug, Clone, Default)]
pub struct CycleScratch {
    rows: usize,
    colors: Vec<Color>,
    data: Vec<CycleData>,
    stack_slot: Vec<usize>,
    edges: Vec<EdgeParity>,
}

impl CycleScratch {
    /// Creates empty scratch space; it is sized on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all counters and sizes the buffers for `view`.
    pub fn reset(&mut self, view: &GraphView) {
        let nodes = view.rows() + view.cols();
        self.rows = view.rows();
        self.colors.clear();
        self.colors.resize(nodes, Color::White);
        self.data.clear();
        self.data.resize(nodes, CycleData::default());
        self.stack_slot.clear();
        self.stack_slot.resize(nodes, 0);
        self.edges.clear();
        self.edges.resize(view.edges().len(), EdgeParity::default());
    }

    /// Counters of the tail side of vertex `row`.
    pub fn tail_data(&self, row: usize) -> &CycleData {
        &self.data[row]
    }

    /// Counters of the head side of vertex `col`.
    pub fn head_data(&self, col: usize) -> &CycleData {
        &self.data[self.rows + col]
    }

    /// Final colour of the tail side of vertex `row`.
    pub fn tail_color(&self, row: usize) -> Color {
        self.colors[row]
    }

    /// Final colour of the head side of vertex `col`.
    pub fn head_color(&self, col: usize) -> Color {
        self.colors[self.rows + col]
    }

    /// Even/odd crossing counts of an edge.
    pub fn edge_parity(&self, edge: EdgeId) -> EdgeParity {
        self.edges.get(edge.index()).copied().unwrap_or_default()
    }

    /// Whether the scratch has been sized for at least one traversal.
    pub fn is_populated(&self) -> bool {
        !self.colors.is_empty()
    }
}

/// One step of a closed alternating cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStep {
    /// Edge crossed by the step.
    pub edge: EdgeId,
    /// Row of the crossed cell.
    pub row: usize,
    /// Column of the crossed cell.
    pub col: usize,
    /// Direction of the crossing.
    pub parity: Parity,
}

/// Closed alternating cycle discovered by a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracedCycle {
    steps: Vec<CycleStep>,
    up_zeros: usize,
    low_zeros: usize,
}

impl TracedCycle {
    /// Steps in traversal order.
    pub fn steps(&self) -> &[CycleStep] {
        &self.steps
    }

    /// Number of steps (always even, at least 4).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the cycle has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Odd steps through zero cells; any such step forbids a positive shift.
    pub fn up_zeros(&self) -> usize {
        self.up_zeros
    }

    /// Even steps through zero cells; any such step forbids a negative shift.
    pub fn low_zeros(&self) -> usize {
        self.low_zeros
    }

    /// Largest positive shift: the smallest weight on an odd step.
    pub fn upper_bound(&self, matrix: &IntMatrix) -> i64 {
        self.bound(matrix, Parity::Odd)
    }

    /// Largest negative shift magnitude: the smallest weight on an even step.
    pub fn lower_bound(&self, matrix: &IntMatrix) -> i64 {
        self.bound(matrix, Parity::Even)
    }

    fn bound(&self, matrix: &IntMatrix, parity: Parity) -> i64 {
        self.steps
            .iter()
            .filter(|step| step.parity == parity)
            .map(|step| matrix.get(step.row, step.col))
            .min()
            .unwrap_or(0)
    }
}

/// Outcome of a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TraceReport {
    /// Closed cycles encountered before the traversal stopped.
    pub closed_cycles: usize,
    /// First cycle accepted by the caller's selector, if any.
    pub selected: Option<TracedCycle>,
}

struct Frame {
    node: usize,
    via: Option<EdgeId>,
    neighbours: Vec<EdgeId>,
    next: usize,
}

/// Depth-first alternating traversal over a [`GraphView`].
#[derive(Debug, Clone, Copy)]
pub struct CycleTracker<'a> {
    view: &'a GraphView,
    matrix: &'a IntMatrix,
}

impl<'a> CycleTracker<'a> {
    /// Creates a tracker over the view and the matrix it aliases.
    pub fn new(view: &'a GraphView, matrix: &'a IntMatrix) -> Self {
        Self { view, matrix }
    }

    /// Traverses from the tail side of `start_row`.
    ///
    /// Stops at the first closed cycle for which `select` returns true.
    /// Neighbour order is shuffled when `rng` is supplied.
    pub fn trace_from(
        &self,
        start_row: usize,
        scratch: &mut CycleScratch,
        rng: Option<&mut RngHandle>,
        select: impl FnMut(&TracedCycle) -> bool,
    ) -> TraceReport {
        scratch.reset(self.view);
        let mut report = TraceReport::default();
        if start_row < self.view.rows() {
            self.traverse([start_row], scratch, rng, select, &mut report);
        }
        report
    }

    /// Traverses every vertex side, starting a new tree at each unreached one.
    pub fn trace_all(
        &self,
        scratch: &mut CycleScratch,
        rng: Option<&mut RngHandle>,
        select: impl FnMut(&TracedCycle) -> bool,
    ) -> TraceReport {
        scratch.reset(self.view);
        let mut report = TraceReport::default();
        let nodes = self.view.rows() + self.view.cols();
        self.traverse(0..nodes, scratch, rng, select, &mut report);
        report
    }

    fn traverse(
        &self,
        roots: impl IntoIterator<Item = usize>,
        scratch: &mut CycleScratch,
        mut rng: Option<&mut RngHandle>,
        mut select: impl FnMut(&TracedCycle) -> bool,
        report: &mut TraceReport,
    ) {
        let rows = self.view.rows();
        for root in roots {
            if scratch.colors[root] != Color::White {
                continue;
            }
            scratch.colors[root] = Color::Gray;
            scratch.data[root].visits += 1;
            scratch.stack_slot[root] = 0;
            let mut stack = vec![self.frame(root, None, rng.as_deref_mut())];

            while let Some(frame) = stack.last_mut() {
                let Some(&edge_id) = frame.neighbours.get(frame.next) else {
                    let node = frame.node;
                    stack.pop();
                    scratch.colors[node] = Color::Black;
                    continue;
                };
                frame.next += 1;
                if frame.via == Some(edge_id) {
                    continue;
                }
                let node = frame.node;

                let edge = self.view.edge(edge_id);
                let (target, parity) = if node < rows {
                    (rows + edge.head(), Parity::Even)
                } else {
                    (edge.tail(), Parity::Odd)
                };
                let zero = edge.weight(self.matrix) == 0;
                let up_step = usize::from(zero && parity == Parity::Odd);
                let low_step = usize::from(zero && parity == Parity::Even);
                let origin = scratch.data[node];

                let crossing = &mut scratch.edges[edge_id.index()];
                match parity {
                    Parity::Even => crossing.even += 1,
                    Parity::Odd => crossing.odd += 1,
                }
                let arrival = &mut scratch.data[target];
                arrival.visits += 1;
                arrival.up_zero_visits += up_step;
                arrival.low_zero_visits += low_step;

                match scratch.colors[target] {
                    Color::White => {
                        arrival.up_zeros = origin.up_zeros + up_step;
                        arrival.low_zeros = origin.low_zeros + low_step;
                        scratch.colors[target] = Color::Gray;
                        scratch.stack_slot[target] = stack.len();
                        stack.push(self.frame(target, Some(edge_id), rng.as_deref_mut()));
                    }
                    Color::Gray => {
                        report.closed_cycles += 1;
                        let closing = scratch.data[target];
                        let mut steps: Vec<CycleStep> = stack[scratch.stack_slot[target] + 1..]
                            .iter()
                            .filter_map(|frame| {
                                frame.via.map(|via| self.step(via, frame.node >= rows))
                            })
                            .collect();
                        steps.push(self.step(edge_id, parity == Parity::Even));
                        let cycle = TracedCycle {
                            steps,
                            up_zeros: origin.up_zeros + up_step - closing.up_zeros,
                            low_zeros: origin.low_zeros + low_step - closing.low_zeros,
                        };
                        if select(&cycle) {
                            report.selected = Some(cycle);
                            return;
                        }
                    }
                    Color::Black => {}
                }
            }
        }
    }

    fn frame(&self, node: usize, via: Option<EdgeId>, rng: Option<&mut RngHandle>) -> Frame {
        let rows = self.view.rows();
        let mut neighbours = if node < rows {
            self.view.row_free_edges(node).to_vec()
        } else {
            self.view.col_free_edges(node - rows).to_vec()
        };
        if let Some(rng) = rng {
            neighbours.shuffle(rng);
        }
        Frame {
            node,
            via,
            neighbours,
            next: 0,
        }
    }

    fn step(&self, edge_id: EdgeId, even: bool) -> CycleStep {
        let edge = self.view.edge(edge_id);
        CycleStep {
            edge: edge_id,
            row: edge.tail(),
            col: edge.head(),
            parity: if even { Parity::Even } else { Parity::Odd },
        }
    }
}
