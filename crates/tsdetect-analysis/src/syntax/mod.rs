//! Owned Java syntax model consumed by every detector.
//!
//! Nodes are tagged variants; detectors match on them instead of probing
//! runtime types. The model is immutable once lowered.

pub mod types;
pub mod visit;

pub use types::*;
pub use visit::Visit;
