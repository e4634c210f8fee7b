//! Detector trait.

use super::{AnalysisContext, SmellKind};
use crate::report::CodeElement;

/// Contract every smell detector implements.
///
/// A detector is single-use: the orchestrator builds a fresh instance per
/// file pair and granularity pass, calls `analyze` once, then reads the
/// elements.
pub trait Detector {
    fn kind(&self) -> SmellKind;

    /// Report column name.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Populate the element list from the parsed trees.
    fn analyze(&mut self, ctx: &AnalysisContext<'_>);

    fn elements(&self) -> &[CodeElement];

    /// True if any element is flagged.
    fn has_smell(&self) -> bool {
        self.elements().iter().any(|e| e.has_smell)
    }

    fn into_elements(self: Box<Self>) -> Vec<CodeElement>;
}
