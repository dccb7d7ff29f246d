//! Human readable renderings of views and traversal data.
//!
//! Indices are shown 1-based here and nowhere else.

use std::fmt;

use ng_core::IntMatrix;

use crate::cycles::{CycleData, CycleScratch};
use crate::view::{EdgeId, GraphView};

/// Renders a matrix with fixed-width columns.
pub fn format_matrix(matrix: &IntMatrix) -> String {
    matrix.to_string()
}

/// Renders one edge: endpoints, weight and (if available) parity counts.
pub fn format_edge(
    view: &GraphView,
    matrix: &IntMatrix,
    edge: EdgeId,
    scratch: Option<&CycleScratch>,
) -> String {
    EdgeReport {
        view,
        matrix,
        edge,
        scratch,
    }
    .to_string()
}

/// Renders one vertex: its edge lists and (if available) cycle data.
pub fn format_vertex(
    view: &GraphView,
    matrix: &IntMatrix,
    index: usize,
    scratch: Option<&CycleScratch>,
) -> String {
    VertexReport {
        view,
        matrix,
        index,
        scratch,
    }
    .to_string()
}

struct EdgeReport<'a> {
    view: &'a GraphView,
    matrix: &'a IntMatrix,
    edge: EdgeId,
    scratch: Option<&'a CycleScratch>,
}

impl fmt::Display for EdgeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = self.view.edge(self.edge);
        writeln!(f, "Edge: {}->{}", edge.tail() + 1, edge.head() + 1)?;
        writeln!(f, "Weight: {}", edge.weight(self.matrix))?;
        if edge.is_fixed() {
            writeln!(f, "fixed")?;
        }
        if let Some(scratch) = self.scratch.filter(|scratch| scratch.is_populated()) {
            let parity = scratch.edge_parity(self.edge);
            writeln!(f, "even: {} odd: {}", parity.even, parity.odd)?;
        }
        Ok(())
    }
}

struct VertexReport<'a> {
    view: &'a GraphView,
    matrix: &'a IntMatrix,
    index: usize,
    scratch: Option<&'a CycleScratch>,
}

impl VertexReport<'_> {
    fn edge_table(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        edges: &[EdgeId],
    ) -> fmt::Result {
        writeln!(f, "{title}")?;
        writeln!(f, "------------")?;
        write!(f, "{:>8}", "Tail: ")?;
        for id in edges {
            write!(f, "{:>2} ", self.view.edge(*id).tail() + 1)?;
        }
        writeln!(f)?;
        write!(f, "{:>8}", "Head: ")?;
        for id in edges {
            write!(f, "{:>2} ", self.view.edge(*id).head() + 1)?;
        }
        writeln!(f)?;
        write!(f, "{:>8}", "Weight: ")?;
        for id in edges {
            write!(f, "{:>2} ", self.view.edge(*id).weight(self.matrix))?;
        }
        writeln!(f)?;
        writeln!(f)
    }
}

fn write_cycle_data(f: &mut fmt::Formatter<'_>, side: &str, data: &CycleData) -> fmt::Result {
    writeln!(
        f,
        "{side}: visits={} up_zero_visits={} low_zero_visits={} up_zeros={} low_zeros={}",
        data.visits, data.up_zero_visits, data.low_zero_visits, data.up_zeros, data.low_zeros
    )
}

impl fmt::Display for VertexReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertex = self.view.vertex(self.index);
        writeln!(f, "------------------------")?;
        writeln!(f, "VERTEX {}", vertex.index() + 1)?;
        writeln!(f, "------------------------")?;
        self.edge_table(f, "In Edges", vertex.in_edges())?;
        self.edge_table(f, "Out Edges", vertex.out_edges())?;
        self.edge_table(f, "Not Out Edges", vertex.not_out_edges())?;
        let Some(scratch) = self.scratch.filter(|scratch| scratch.is_populated()) else {
            return Ok(());
        };
        writeln!(f, "Cycle Data")?;
        writeln!(f, "------------")?;
        if self.index < self.view.rows() {
            write_cycle_data(f, "tail", scratch.tail_data(self.index))?;
        }
        if self.index < self.view.cols() {
            write_cycle_data(f, "head", scratch.head_data(self.index))?;
        }
        Ok(())
    }
}
