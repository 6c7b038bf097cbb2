//! A planar enclosure engine: fences drawn between deduplicated vertices, closure detection,
//! enclosed area, and placement rules for fences and rectangular elements.

mod config;
mod element;
mod error;
mod graph;
mod pair;
mod placement;
mod plan;
mod registry;
mod tolerance;
mod tool;
mod workspace;

pub mod cartesian;

pub use self::config::Config;
pub use self::element::{Element, ElementId, ElementKind, Objective, Properties};
pub use self::error::{Error, Violation};
pub use self::graph::{Cycle, Fence, FenceId, FenceKind, Graph, Removal, Split};
pub use self::pair::MaybePair;
pub use self::plan::{Plan, PlanId, Status};
pub use self::registry::{Vertex, VertexId, VertexRegistry};
pub use self::tolerance::{IsClose, Positive, Tolerance};
pub use self::tool::{FenceTool, Input, Outcome};
pub use self::workspace::{Ledger, Workspace};

/// A type whose distance to other instances of itself is defined.
pub trait Distance {
    /// The distance type.
    type Distance;

    /// Returns the distance between self and rhs.
    fn distance(&self, rhs: &Self) -> Self::Distance;
}
