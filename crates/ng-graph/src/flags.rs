use serde::{Deserialize, Serialize};

/// Structural options shared by the constructor and the samplers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureConfig {
    /// Whether diagonal cells of a square matrix may carry an edge.
    #[serde(default = "default_allow_self_loops")]
    pub allow_self_loops: bool,
}

fn default_allow_self_loops() -> bool {
    true
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            allow_self_loops: default_allow_self_loops(),
        }
    }
}

impl StructureConfig {
    /// Configuration forbidding self loops on square matrices.
    pub const fn loopless() -> Self {
        Self {
            allow_self_loops: false,
        }
    }

    /// Returns whether `(row, col)` may ever carry an edge in a `shape` matrix.
    pub fn is_eligible(&self, shape: (usize, usize), row: usize, col: usize) -> bool {
        self.allow_self_loops || shape.0 != shape.1 || row != col
    }
}
