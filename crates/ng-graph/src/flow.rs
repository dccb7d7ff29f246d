use std::collections::VecDeque;

use ng_core::errors::{ErrorInfo, NgError};
use ng_core::IntMatrix;
use tracing::trace;

use crate::flags::StructureConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VertexColor {
    White,
    Gray,
    Black,
}

#[derive(Debug, Clone, Copy)]
struct SearchState {
    distance: usize,
    color: VertexColor,
    /// Arc used to reach the vertex in the latest search.
    predecessor: Option<usize>,
}

impl SearchState {
    const UNSEEN: Self = Self {
        distance: 0,
        color: VertexColor::White,
        predecessor: None,
    };
}

#[derive(Debug, Clone)]
struct Arc {
    to: usize,
    capacity: i64,
    flow: i64,
}

impl Arc {
    fn residual(&self) -> i64 {
        self.capacity - self.flow
    }
}

#[derive(Debug, Clone, Copy)]
struct CellArc {
    row: usize,
    col: usize,
    arc: usize,
}

/// Residual flow network used to build one feasible matrix.
///
/// Vertices are laid out as `source`, one out-vertex per row, one in-vertex
/// per column, then `sink`. Arcs are stored in pairs so that `arc ^ 1` is
/// always the reverse of `arc`. Cells pinned by the fixed matrix are
/// pre-saturated: they are subtracted from the degrees up front and never
/// appear as arcs.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    rows: usize,
    cols: usize,
    states: Vec<SearchState>,
    adjacency: Vec<Vec<usize>>,
    arcs: Vec<Arc>,
    cell_arcs: Vec<CellArc>,
    fixed: IntMatrix,
    source: usize,
    sink: usize,
    demand: i64,
    total_flow: i64,
}

impl FlowNetwork {
    /// Builds the network for the given degree sequences and fixed pattern.
    ///
    /// Inputs must already have passed [`check_inputs`](crate::check_inputs).
    pub fn new(
        out_degree: &[i64],
        in_degree: &[i64],
        fixed: &IntMatrix,
        structure: &StructureConfig,
    ) -> Result<Self, NgError> {
        let out_total = checked_total(out_degree, "out_degree")?;
        let in_total = checked_total(in_degree, "in_degree")?;
        if out_total != in_total {
            return Err(NgError::Infeasible(
                ErrorInfo::new(
                    "degree-sum-mismatch",
                    "out-degree and in-degree sequences have different totals",
                )
                .with_context("out_total", out_total.to_string())
                .with_context("in_total", in_total.to_string()),
            ));
        }

        let (rows, cols) = fixed.shape();
        let (row_cells, col_cells) = eligible_counts(fixed.shape(), structure);
        check_capacity(out_degree, &row_cells, "row")?;
        check_capacity(in_degree, &col_cells, "col")?;

        let remaining_out = remaining(out_degree, &fixed.row_sums(), "row")?;
        let remaining_in = remaining(in_degree, &fixed.col_sums(), "col")?;

        let source = 0;
        let sink = rows + cols + 1;
        let mut network = Self {
            rows,
            cols,
            states: vec![SearchState::UNSEEN; sink + 1],
            adjacency: vec![Vec::new(); sink + 1],
            arcs: Vec::new(),
            cell_arcs: Vec::new(),
            fixed: fixed.clone(),
            source,
            sink,
            demand: remaining_out.iter().sum(),
            total_flow: 0,
        };

        for (row, &capacity) in remaining_out.iter().enumerate() {
            if capacity > 0 {
                network.add_edge(source, network.out_vertex(row), capacity);
            }
        }
        for row in 0..rows {
            for col in 0..cols {
                if fixed.get(row, col) == 1 || !structure.is_eligible((rows, cols), row, col) {
                    continue;
                }
                let arc = network.add_edge(network.out_vertex(row), network.in_vertex(col), 1);
                network.cell_arcs.push(CellArc { row, col, arc });
            }
        }
        for (col, &capacity) in remaining_in.iter().enumerate() {
            if capacity > 0 {
                network.add_edge(network.in_vertex(col), sink, capacity);
            }
        }
        Ok(network)
    }

    fn out_vertex(&self, row: usize) -> usize {
        1 + row
    }

    fn in_vertex(&self, col: usize) -> usize {
        1 + self.rows + col
    }

    /// Adds an arc with the given capacity together with its zero-capacity reverse.
    fn add_edge(&mut self, from: usize, to: usize, capacity: i64) -> usize {
        let index = self.arcs.len();
        self.arcs.push(Arc {
            to,
            capacity,
            flow: 0,
        });
        self.arcs.push(Arc {
            to: from,
            capacity: 0,
            flow: 0,
        });
        self.adjacency[from].push(index);
        self.adjacency[to].push(index + 1);
        index
    }

    /// Breadth-first search for a shortest augmenting path in the residual network.
    ///
    /// Returns whether the sink was reached. The path is retained in the
    /// predecessor links for [`path_flow`](Self::path_flow) and
    /// [`update_flow`](Self::update_flow).
    pub fn find_path(&mut self) -> bool {
        self.states.fill(SearchState::UNSEEN);
        self.states[self.source].color = VertexColor::Gray;
        let mut queue = VecDeque::from([self.source]);
        while let Some(vertex) = queue.pop_front() {
            let distance = self.states[vertex].distance + 1;
            for &arc_index in &self.adjacency[vertex] {
                let arc = &self.arcs[arc_index];
                if arc.residual() <= 0 || self.states[arc.to].color != VertexColor::White {
                    continue;
                }
                self.states[arc.to] = SearchState {
                    distance,
                    color: VertexColor::Gray,
                    predecessor: Some(arc_index),
                };
                if arc.to == self.sink {
                    return true;
                }
                queue.push_back(arc.to);
            }
            self.states[vertex].color = VertexColor::Black;
        }
        false
    }

    fn path_arcs(&self) -> Vec<usize> {
        let mut arcs = Vec::new();
        if self.states[self.sink].color == VertexColor::White {
            return arcs;
        }
        let mut vertex = self.sink;
        while let Some(arc_index) = self.states[vertex].predecessor {
            arcs.push(arc_index);
            vertex = self.arcs[arc_index ^ 1].to;
        }
        arcs
    }

    /// Bottleneck residual capacity along the latest augmenting path (0 if none).
    pub fn path_flow(&self) -> i64 {
        self.path_arcs()
            .into_iter()
            .map(|arc| self.arcs[arc].residual())
            .min()
            .unwrap_or(0)
    }

    /// Pushes `amount` units along the latest augmenting path.
    pub fn update_flow(&mut self, amount: i64) {
        if amount <= 0 {
            return;
        }
        let path = self.path_arcs();
        for &arc in &path {
            self.arcs[arc].flow += amount;
            self.arcs[arc ^ 1].flow -= amount;
        }
        self.total_flow += amount;
        trace!(
            amount,
            hops = path.len(),
            distance = self.states[self.sink].distance,
            total = self.total_flow,
            "augmented flow"
        );
    }

    /// Total flow pushed from the source so far.
    pub fn total_flow(&self) -> i64 {
        self.total_flow
    }

    /// Fails with `Infeasible` unless every remaining degree is saturated.
    pub fn ensure_saturated(&self) -> Result<(), NgError> {
        if self.total_flow == self.demand {
            return Ok(());
        }
        Err(NgError::Infeasible(
            ErrorInfo::new(
                "unsatisfied-demand",
                "degree sequences cannot be completed around the fixed pattern",
            )
            .with_context("demand", self.demand.to_string())
            .with_context("flow", self.total_flow.to_string())
            .with_hint("check that the fixed pattern leaves enough eligible cells"),
        ))
    }

    /// Emits the matrix of flows between out- and in-vertices plus the fixed cells.
    pub fn weight_matrix(&self) -> IntMatrix {
        let mut matrix = IntMatrix::zeros(self.rows, self.cols);
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.fixed.get(row, col) == 1 {
                    matrix.set(row, col, 1);
                }
            }
        }
        for cell in &self.cell_arcs {
            let flow = self.arcs[cell.arc].flow;
            if flow > 0 {
                matrix.set(cell.row, cell.col, flow);
            }
        }
        matrix
    }
}

fn remaining(degrees: &[i64], fixed_sums: &[i64], axis: &str) -> Result<Vec<i64>, NgError> {
    degrees
        .iter()
        .zip(fixed_sums)
        .enumerate()
        .map(|(index, (&degree, &pinned))| {
            if pinned > degree {
                Err(NgError::Infeasible(
                    ErrorInfo::new(
                        "fixed-exceeds-degree",
                        "fixed edges exceed the prescribed degree",
                    )
                    .with_context(axis, index.to_string())
                    .with_context("degree", degree.to_string())
                    .with_context("fixed", pinned.to_string()),
                ))
            } else {
                Ok(degree - pinned)
            }
        })
        .collect()
}

fn checked_total(degrees: &[i64], label: &str) -> Result<i64, NgError> {
    degrees
        .iter()
        .try_fold(0i64, |total, &degree| total.checked_add(degree))
        .ok_or_else(|| {
            NgError::Infeasible(
                ErrorInfo::new("degree-overflow", "degree total does not fit in an i64")
                    .with_context("vector", label),
            )
        })
}

fn eligible_counts(shape: (usize, usize), structure: &StructureConfig) -> (Vec<usize>, Vec<usize>) {
    let (rows, cols) = shape;
    let mut row_cells = vec![0; rows];
    let mut col_cells = vec![0; cols];
    for row in 0..rows {
        for col in 0..cols {
            if structure.is_eligible(shape, row, col) {
                row_cells[row] += 1;
                col_cells[col] += 1;
            }
        }
    }
    (row_cells, col_cells)
}

/// Cell arcs carry capacity 1, so a degree above the eligible cell count of
/// its row or column can never be met.
fn check_capacity(degrees: &[i64], cells: &[usize], axis: &str) -> Result<(), NgError> {
    let exceeded = degrees
        .iter()
        .zip(cells)
        .enumerate()
        .find(|(_, (&degree, &count))| u64::try_from(degree).map_or(true, |d| d > count as u64));
    match exceeded {
        None => Ok(()),
        Some((index, (&degree, &count))) => Err(NgError::Infeasible(
            ErrorInfo::new(
                "degree-exceeds-capacity",
                "degree exceeds the number of eligible cells",
            )
            .with_context(axis, index.to_string())
            .with_context("degree", degree.to_string())
            .with_context("cells", count.to_string()),
        )),
    }
}
