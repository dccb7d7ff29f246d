use ng_core::IntMatrix;
use serde::{Deserialize, Serialize};

use crate::flags::StructureConfig;

/// Identifier of an [`Edge`] inside a [`GraphView`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Creates an identifier from its arena position.
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena position of the edge.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Directed edge aliasing one cell of the adjacency matrix.
///
/// The edge never stores a weight: [`Edge::weight`] reads the aliased cell, so
/// mutating the matrix is immediately visible through every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    tail: usize,
    head: usize,
    cell: usize,
    fixed: bool,
}

impl Edge {
    /// Row (out-vertex) of the edge.
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Column (in-vertex) of the edge.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Flat matrix cell aliased by the edge.
    pub fn cell(&self) -> usize {
        self.cell
    }

    /// Whether the cell is pinned by the fixed matrix.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Current weight, read through the matrix.
    pub fn weight(&self, matrix: &IntMatrix) -> i64 {
        matrix.cell(self.cell)
    }
}

/// Vertex view: edge lists derived from the current matrix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vertex {
    index: usize,
    in_edges: Vec<EdgeId>,
    out_edges: Vec<EdgeId>,
    not_out_edges: Vec<EdgeId>,
}

impl Vertex {
    fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Stable 0-based position of the vertex.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Present edges whose head is this vertex.
    pub fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    /// Present edges whose tail is this vertex.
    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    /// Absent, eligible, non-fixed cells that could become out-edges.
    pub fn not_out_edges(&self) -> &[EdgeId] {
        &self.not_out_edges
    }

    /// Current in-degree (number of present in-edges).
    pub fn in_degree(&self) -> usize {
        self.in_edges.len()
    }

    /// Current out-degree (number of present out-edges).
    pub fn out_degree(&self) -> usize {
        self.out_edges.len()
    }
}

/// Immutable edge/vertex arena derived from an adjacency and a fixed matrix.
///
/// A view is never patched. Whenever an accepted edit adds or removes an edge
/// the owner builds a fresh view from the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    rows: usize,
    cols: usize,
    edges: Vec<Edge>,
    vertices: Vec<Vertex>,
    cell_edges: Vec<Option<EdgeId>>,
    free_present: Vec<EdgeId>,
    row_free: Vec<Vec<EdgeId>>,
    col_free: Vec<Vec<EdgeId>>,
}

impl GraphView {
    /// Builds the view for `matrix`, marking cells pinned by `fixed`.
    ///
    /// Both matrices must share a shape; callers validate inputs first.
    pub fn build(matrix: &IntMatrix, fixed: &IntMatrix, structure: &StructureConfig) -> Self {
        debug_assert_eq!(matrix.shape(), fixed.shape());
        let (rows, cols) = matrix.shape();
        let mut view = Self {
            rows,
            cols,
            edges: Vec::new(),
            vertices: (0..rows.max(cols)).map(Vertex::new).collect(),
            cell_edges: vec![None; rows * cols],
            free_present: Vec::new(),
            row_free: vec![Vec::new(); rows],
            col_free: vec![Vec::new(); cols],
        };
        for row in 0..rows {
            for col in 0..cols {
                if !structure.is_eligible((rows, cols), row, col) {
                    continue;
                }
                let cell = matrix.cell_index(row, col);
                let id = EdgeId(view.edges.len());
                let is_fixed = fixed.cell(cell) == 1;
                view.edges.push(Edge {
                    tail: row,
                    head: col,
                    cell,
                    fixed: is_fixed,
                });
                view.cell_edges[cell] = Some(id);
                let present = matrix.cell(cell) > 0;
                if present {
                    view.vertices[row].out_edges.push(id);
                    view.vertices[col].in_edges.push(id);
                }
                if is_fixed {
                    continue;
                }
                view.row_free[row].push(id);
                view.col_free[col].push(id);
                if present {
                    view.free_present.push(id);
                } else {
                    view.vertices[row].not_out_edges.push(id);
                }
            }
        }
        view
    }

    /// Number of matrix rows (out-vertices).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of matrix columns (in-vertices).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All edges of the arena: every eligible cell, present or not.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the edge for `id`.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// All vertices; vertex `i` owns row `i` and column `i`.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the vertex at `index`.
    pub fn vertex(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }

    /// Edge aliasing `(row, col)`, or `None` when the cell is out of range or
    /// structurally disallowed.
    pub fn edge_at(&self, row: usize, col: usize) -> Option<EdgeId> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cell_edges[row * self.cols + col]
    }

    /// Present edges that are not fixed.
    pub fn free_present_edges(&self) -> &[EdgeId] {
        &self.free_present
    }

    /// Every non-fixed eligible cell in `row`, regardless of weight.
    pub fn row_free_edges(&self, row: usize) -> &[EdgeId] {
        &self.row_free[row]
    }

    /// Every non-fixed eligible cell in `col`, regardless of weight.
    pub fn col_free_edges(&self, col: usize) -> &[EdgeId] {
        &self.col_free[col]
    }
}
