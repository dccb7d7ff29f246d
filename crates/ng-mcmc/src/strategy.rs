use ng_core::{IntMatrix, NgError, RngHandle};
use ng_graph::{apply_edit_dry_run, Edit, EditDryRun, EditLimits, GraphView, StructureConfig};

/// Read-only state a strategy sees while proposing an edit.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Current adjacency matrix.
    pub matrix: &'a IntMatrix,
    /// Fixed pattern; cells equal to 1 are immutable.
    pub fixed: &'a IntMatrix,
    /// Structural options of the run.
    pub structure: &'a StructureConfig,
    /// View built from `matrix`.
    pub view: &'a GraphView,
}

impl StepContext<'_> {
    /// Whether `edit` keeps margins, fixed cells and bounds intact under `limits`.
    pub fn admits(&self, limits: EditLimits, edit: &Edit) -> bool {
        matches!(
            apply_edit_dry_run(self.matrix, self.fixed, self.structure, limits, edit),
            EditDryRun::Valid { .. }
        )
    }
}

/// Local move generator driven by [`crate::Sampler`].
pub trait MoveStrategy {
    /// Short identifier used in logs and summaries.
    fn name(&self) -> &'static str;

    /// Whether seed matrices must be binary.
    fn requires_binary(&self) -> bool {
        false
    }

    /// Bounds every edit produced by this strategy must stay within.
    fn limits(&self) -> EditLimits {
        EditLimits::default()
    }

    /// Proposes one edit, or returns [`NgError::Rigid`] when no candidate exists.
    fn propose(&mut self, ctx: &StepContext<'_>, rng: &mut RngHandle) -> Result<Edit, NgError>;

    /// Validity predicate consulted before the driver applies `edit`.
    fn validate(&self, ctx: &StepContext<'_>, edit: &Edit) -> bool {
        ctx.admits(self.limits(), edit)
    }
}
