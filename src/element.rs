//! Rectangular objects placed inside an enclosure.

use std::fmt;

use crate::{VertexId, pair::MaybePair};

/// The identity of an [`Element`] in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub(crate) usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A quantitative goal fed by the enclosure and the elements inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    Area,
    Shelter,
    Waterer,
    Perch,
    Shrubs,
    Insectary,
    Dustbath,
}

impl Objective {
    pub const ALL: [Objective; 7] = [
        Objective::Area,
        Objective::Shelter,
        Objective::Waterer,
        Objective::Perch,
        Objective::Shrubs,
        Objective::Insectary,
        Objective::Dustbath,
    ];
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Objective::Area => "area",
            Objective::Shelter => "shelter",
            Objective::Waterer => "waterer",
            Objective::Perch => "perch",
            Objective::Shrubs => "shrubs",
            Objective::Insectary => "insectary",
            Objective::Dustbath => "dustbath",
        };

        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    Shelter,
    Waterer,
    Perch,
    Shrub,
    Insectary,
    Dustbath,
    Tree,
    /// A fence upgraded into a door; never placed as a rectangle.
    Door,
}

/// The defaults of a placeable [`ElementKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Properties {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    pub objective_value: f64,
    pub label: &'static str,
}

/// Value contributed by every tree to the perch objective.
const TREE_PERCH_BONUS: f64 = 50.;
/// Value contributed by every tree to the shrubs objective.
const TREE_SHRUBS_BONUS: f64 = 1.;

impl ElementKind {
    /// Returns the default properties of this kind, or [`None`] if it cannot be placed as a
    /// rectangle.
    pub fn properties(&self) -> Option<Properties> {
        let (width, height, objective_value, label) = match self {
            ElementKind::Shelter => (100., 100., 1., "Shelter"),
            ElementKind::Waterer => (40., 40., 1., "Waterer"),
            ElementKind::Perch => (100., 20., 1., "Perch"),
            ElementKind::Shrub => (50., 50., 1., "Shrub"),
            ElementKind::Insectary => (60., 60., 1., "Insectary"),
            ElementKind::Dustbath => (80., 80., 1., "Dust bath"),
            ElementKind::Tree => (80., 80., 0., "Tree"),
            ElementKind::Door => return None,
        };

        Some(Properties {
            width,
            height,
            objective_value,
            label,
        })
    }

    /// Returns the objectives an element of this kind contributes to.
    pub fn objectives(&self) -> Option<MaybePair<Objective>> {
        let objective = match self {
            ElementKind::Shelter => Objective::Shelter,
            ElementKind::Waterer => Objective::Waterer,
            ElementKind::Perch => Objective::Perch,
            ElementKind::Shrub => Objective::Shrubs,
            ElementKind::Insectary => Objective::Insectary,
            ElementKind::Dustbath => Objective::Dustbath,
            ElementKind::Tree => {
                return Some(MaybePair::Pair([Objective::Perch, Objective::Shrubs]));
            }
            ElementKind::Door => return None,
        };

        Some(MaybePair::Single(objective))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.properties() {
            Some(properties) => write!(f, "{}", properties.label.to_lowercase()),
            None => write!(f, "door"),
        }
    }
}

/// A placed rectangle, positioned by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub kind: ElementKind,
    /// The vertex at the top-left corner of the element.
    pub anchor: VertexId,
    pub width: f64,
    pub height: f64,
    pub objective_value: f64,
}

impl Element {
    /// Returns the value this element adds to each of the objectives it contributes to.
    ///
    /// Trees add fixed bonuses instead of their objective value.
    pub fn contributions(&self) -> Option<MaybePair<(Objective, f64)>> {
        Some(match self.kind.objectives()? {
            MaybePair::Single(objective) => MaybePair::Single((objective, self.objective_value)),
            MaybePair::Pair([perch, shrubs]) => MaybePair::Pair([
                (perch, TREE_PERCH_BONUS),
                (shrubs, TREE_SHRUBS_BONUS),
            ]),
        })
    }

    /// Returns true if, and only if, this element contributes to the given objective.
    pub fn contributes_to(&self, objective: Objective) -> bool {
        self.kind
            .objectives()
            .is_some_and(|objectives| objectives.contains(&objective))
    }
}
