use std::{collections::BTreeMap, fmt};

use crate::{IsClose, Tolerance, cartesian::Point};

/// The identity of a [`Vertex`] in a [`VertexRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(pub(crate) usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A deduplicated point shared by fence endpoints and element anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// The location of the vertex.
    pub position: Point,
    /// The amount of fences ending at this vertex.
    degree: usize,
    /// The amount of elements anchored at this vertex.
    anchors: usize,
}

impl Vertex {
    /// Returns the amount of fences ending at this vertex.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns true if, and only if, any element is anchored at this vertex.
    pub fn is_anchor(&self) -> bool {
        self.anchors > 0
    }

    /// Returns true if, and only if, nothing references this vertex anymore.
    fn is_orphan(&self) -> bool {
        self.degree == 0 && self.anchors == 0
    }
}

/// The key of a square bucket of the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Cell(i64, i64);

/// Maps coordinates into logical vertices, coalescing those closer than the tolerance.
#[derive(Debug, Clone)]
pub struct VertexRegistry {
    vertices: Vec<Option<Vertex>>,
    buckets: BTreeMap<Cell, Vec<VertexId>>,
    tolerance: Tolerance<f64>,
    /// The side of the buckets, never smaller than the tolerance.
    cell: f64,
}

impl VertexRegistry {
    pub fn new(tolerance: Tolerance<f64>) -> Self {
        Self {
            vertices: Vec::new(),
            buckets: BTreeMap::new(),
            cell: tolerance.epsilon().max(1.),
            tolerance,
        }
    }

    /// Returns the vertex with the given id, if any.
    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)?.as_ref()
    }

    /// Returns the position of the vertex with the given id, if any.
    pub fn position(&self, id: VertexId) -> Option<Point> {
        self.get(id).map(|vertex| vertex.position)
    }

    /// Returns the amount of fences ending at the given vertex, zero if it does not exist.
    pub fn degree(&self, id: VertexId) -> usize {
        self.get(id).map(Vertex::degree).unwrap_or_default()
    }

    /// Returns an iterator over all the live vertices.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|vertex| (VertexId(index), vertex)))
    }

    /// Returns the amount of live vertices.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the vertex the given point would resolve into, if it already exists.
    ///
    /// Element anchors are never located, since they are not shared.
    pub fn locate(&self, point: &Point) -> Option<VertexId> {
        let point = point.round();
        let Cell(column, row) = self.cell_of(&point);

        (column - 1..=column + 1)
            .flat_map(|column| (row - 1..=row + 1).map(move |row| Cell(column, row)))
            .filter_map(|cell| self.buckets.get(&cell))
            .flatten()
            .copied()
            .find(|&id| {
                self.get(id).is_some_and(|vertex| {
                    !vertex.is_anchor() && vertex.position.is_close(&point, &self.tolerance)
                })
            })
    }

    /// Returns the position the given point would resolve into, without registering it.
    pub fn snap(&self, point: &Point) -> Point {
        self.locate(point)
            .and_then(|id| self.position(id))
            .unwrap_or_else(|| point.round())
    }

    /// Returns the id of the vertex at the given point, registering a new one if there is none.
    ///
    /// The point is rounded to integer pixels before being resolved.
    pub fn resolve(&mut self, point: &Point) -> VertexId {
        if let Some(id) = self.locate(point) {
            return id;
        }

        self.register(point, 0)
    }

    /// Registers a new vertex at the given point owned by a single element, regardless of any
    /// other vertex being there already.
    pub(crate) fn allocate_anchor(&mut self, point: &Point) -> VertexId {
        self.register(point, 1)
    }

    pub(crate) fn increment(&mut self, id: VertexId) {
        if let Some(vertex) = self.get_mut(id) {
            vertex.degree += 1;
        }
    }

    pub(crate) fn decrement(&mut self, id: VertexId) {
        if let Some(vertex) = self.get_mut(id) {
            vertex.degree = vertex.degree.saturating_sub(1);
        }
    }

    pub(crate) fn release(&mut self, id: VertexId) {
        if let Some(vertex) = self.get_mut(id) {
            vertex.anchors = vertex.anchors.saturating_sub(1);
        }
    }

    /// Removes the given vertex if, and only if, no fence nor element references it. Returns
    /// true if the vertex has been removed.
    pub(crate) fn remove_orphan(&mut self, id: VertexId) -> bool {
        if !self.get(id).is_some_and(Vertex::is_orphan) {
            return false;
        }

        let Some(vertex) = self.vertices[id.0].take() else {
            return false;
        };

        self.unbucket(id, &vertex.position);
        tracing::trace!(vertex = %id, "vertex removed");
        true
    }

    /// Moves the given vertex to the given position, rounded to integer pixels.
    pub(crate) fn relocate(&mut self, id: VertexId, point: &Point) {
        let position = point.round();
        let Some(previous) = self.position(id) else {
            return;
        };

        self.unbucket(id, &previous);
        self.bucket(&position).push(id);
        if let Some(vertex) = self.get_mut(id) {
            vertex.position = position;
        }
    }

    fn register(&mut self, point: &Point, anchors: usize) -> VertexId {
        let id = VertexId(self.vertices.len());
        let position = point.round();
        self.vertices.push(Some(Vertex {
            position,
            degree: 0,
            anchors,
        }));

        self.bucket(&position).push(id);
        tracing::trace!(vertex = %id, x = position.x, y = position.y, "vertex registered");
        id
    }

    fn get_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id.0)?.as_mut()
    }

    fn cell_of(&self, point: &Point) -> Cell {
        Cell(
            (point.x / self.cell).floor() as i64,
            (point.y / self.cell).floor() as i64,
        )
    }

    fn bucket(&mut self, point: &Point) -> &mut Vec<VertexId> {
        let cell = self.cell_of(point);
        self.buckets.entry(cell).or_default()
    }

    fn unbucket(&mut self, id: VertexId, point: &Point) {
        let cell = self.cell_of(point);
        if let Some(bucket) = self.buckets.get_mut(&cell) {
            bucket.retain(|&other| other != id);
            if bucket.is_empty() {
                self.buckets.remove(&cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Tolerance, VertexRegistry, cartesian::Point};

    fn registry() -> VertexRegistry {
        VertexRegistry::new(Tolerance::absolute(0.001))
    }

    #[test]
    fn resolve_coalesces_close_points() {
        struct Test {
            name: &'static str,
            first: Point,
            second: Point,
            want_same: bool,
        }

        vec![
            Test {
                name: "same point",
                first: [100., 100.].into(),
                second: [100., 100.].into(),
                want_same: true,
            },
            Test {
                name: "jitter below the tolerance",
                first: [100., 100.].into(),
                second: [100.0004, 99.9996].into(),
                want_same: true,
            },
            Test {
                name: "rounding into the same pixel",
                first: [100.2, 100.].into(),
                second: [99.8, 100.].into(),
                want_same: true,
            },
            Test {
                name: "neighbouring pixels",
                first: [100., 100.].into(),
                second: [101., 100.].into(),
                want_same: false,
            },
            Test {
                name: "negative coordinates",
                first: [-10., -10.].into(),
                second: [-10.0002, -9.9998].into(),
                want_same: true,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let mut registry = registry();
            let first = registry.resolve(&test.first);
            let second = registry.resolve(&test.second);

            assert_eq!(first == second, test.want_same, "{}", test.name);
            assert_eq!(registry.len(), if test.want_same { 1 } else { 2 }, "{}", test.name);
        });
    }

    #[test]
    fn resolve_with_wide_tolerance() {
        let mut registry = VertexRegistry::new(Tolerance::absolute(2.));
        let first = registry.resolve(&[10., 10.].into());

        assert_eq!(registry.resolve(&[11.9, 8.1].into()), first);
        assert_ne!(registry.resolve(&[13., 10.].into()), first);
    }

    #[test]
    fn degree_bookkeeping() {
        let mut registry = registry();
        let id = registry.resolve(&[0., 0.].into());

        registry.increment(id);
        registry.increment(id);
        assert_eq!(registry.degree(id), 2);

        registry.decrement(id);
        assert!(!registry.remove_orphan(id));
        registry.decrement(id);
        registry.decrement(id);
        assert_eq!(registry.degree(id), 0);
    }

    #[test]
    fn orphans_are_removed_unless_anchored() {
        let mut registry = registry();
        let id = registry.allocate_anchor(&[5., 5.].into());

        assert!(!registry.remove_orphan(id));
        assert!(registry.get(id).is_some());

        registry.release(id);
        assert!(registry.remove_orphan(id));
        assert!(registry.get(id).is_none());

        let other = registry.resolve(&[5., 5.].into());
        assert_ne!(other, id, "ids are never reused");
    }

    #[test]
    fn anchors_are_never_shared() {
        let mut registry = registry();
        let first = registry.allocate_anchor(&[100., 100.].into());
        let second = registry.allocate_anchor(&[100.2, 99.9].into());
        assert_ne!(first, second);

        assert_eq!(registry.locate(&[100., 100.].into()), None);
        assert_eq!(registry.snap(&[100.3, 100.].into()), [100., 100.].into());

        let fence_vertex = registry.resolve(&[100., 100.].into());
        assert!(![first, second].contains(&fence_vertex));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.locate(&[100., 100.].into()), Some(fence_vertex));
    }

    #[test]
    fn relocate_updates_lookup() {
        let mut registry = registry();
        let id = registry.resolve(&[5., 5.].into());

        registry.relocate(id, &[40.4, 60.6].into());
        assert_eq!(registry.position(id), Some([40., 61.].into()));
        assert_eq!(registry.locate(&[5., 5.].into()), None);
        assert_eq!(registry.locate(&[40., 61.].into()), Some(id));
    }
}
