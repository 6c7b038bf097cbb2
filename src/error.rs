use std::fmt;

use thiserror::Error;

use crate::{ElementId, ElementKind, FenceId, PlanId, VertexId};

/// The reason a candidate fence or element has been rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The candidate fence meets an existing one at an angle below the minimum.
    Angle,
    /// The candidate fence crosses an existing one.
    Intersection,
    /// The candidate element overlaps a fence.
    Overlap,
    /// The candidate element lies outside the enclosure.
    Outside,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Angle => write!(f, "angle"),
            Violation::Intersection => write!(f, "intersection"),
            Violation::Overlap => write!(f, "overlap"),
            Violation::Outside => write!(f, "outside"),
        }
    }
}

impl Violation {
    /// Returns the guidance text to show to the user.
    pub fn guidance(&self) -> &'static str {
        match self {
            Violation::Angle => "Fences must not meet at such a sharp angle.",
            Violation::Intersection => "Fences cannot cross each other.",
            Violation::Overlap => "Elements cannot be placed on top of a fence.",
            Violation::Outside => "Elements must be placed inside the enclosure.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// The candidate fence or element is not allowed where it was requested.
    #[error("invalid placement: {0}")]
    InvalidPlacement(Violation),
    /// Both endpoints of the candidate fence resolve to the same vertex.
    #[error("fence endpoints resolve to the same vertex")]
    DegenerateFence,
    /// The given vertex is none of the endpoints of the given fence.
    #[error("vertex {vertex} is not an endpoint of fence {fence}")]
    VertexNotOnFence { fence: FenceId, vertex: VertexId },
    /// The traversal of the fences did not produce a single closed cycle.
    #[error("the fences do not form a single closed cycle")]
    Incomplete,
    /// The plan is in a state that does not allow the requested operation.
    #[error("the plan is not enclosed")]
    NotEnclosed,
    /// The requested position is already taken by another vertex.
    #[error("position is already taken by vertex {0}")]
    Occupied(VertexId),
    /// The element kind cannot be placed as a rectangle.
    #[error("{0} elements cannot be placed as a rectangle")]
    NotPlaceable(ElementKind),
    #[error("unknown plan {0}")]
    UnknownPlan(PlanId),
    #[error("unknown fence {0}")]
    UnknownFence(FenceId),
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),
    #[error("unknown element {0}")]
    UnknownElement(ElementId),
}

impl From<Violation> for Error {
    fn from(violation: Violation) -> Self {
        Self::InvalidPlacement(violation)
    }
}
