//! The fences and vertices of a single plan.

mod traverse;

pub use self::traverse::Cycle;

use std::fmt;

use crate::{
    Config, Distance, Error, IsClose, VertexId, VertexRegistry,
    cartesian::{Point, Segment},
    registry::Vertex,
};

/// The identity of a [`Fence`] in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FenceId(pub(crate) usize);

impl fmt::Display for FenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FenceKind {
    #[default]
    Standard,
    Door,
}

/// A straight edge between two distinct vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fence {
    pub start: VertexId,
    pub end: VertexId,
    pub kind: FenceKind,
}

impl Fence {
    /// Returns true if, and only if, the given vertex is any of the endpoints of this fence.
    pub fn connects(&self, vertex: VertexId) -> bool {
        self.start == vertex || self.end == vertex
    }

    /// Returns the endpoint opposite to the given one, if it is an endpoint at all.
    pub fn other(&self, vertex: VertexId) -> Option<VertexId> {
        if self.start == vertex {
            Some(self.end)
        } else if self.end == vertex {
            Some(self.start)
        } else {
            None
        }
    }
}

/// The outcome of removing a fence from the [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    /// The fence that has been removed.
    pub fence: Fence,
    /// Whether the graph was enclosed right before the removal.
    pub was_enclosed: bool,
}

/// The outcome of splitting a fence in two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// The original fence, now running up to the new vertex.
    pub kept: FenceId,
    /// The fence running from the new vertex to the released endpoint.
    pub new: FenceId,
    /// The vertex where the original fence has been split.
    pub vertex: VertexId,
}

/// The connected set of fences and vertices of a single plan.
#[derive(Debug, Clone)]
pub struct Graph {
    config: Config,
    registry: VertexRegistry,
    fences: Vec<Option<Fence>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Graph {
    pub fn new(config: Config) -> Self {
        Self {
            registry: VertexRegistry::new(config.tolerance()),
            fences: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &VertexRegistry {
        &self.registry
    }

    /// Returns the fence with the given id, if any.
    pub fn fence(&self, id: FenceId) -> Option<&Fence> {
        self.fences.get(id.0)?.as_ref()
    }

    /// Returns an iterator over all the fences in the graph.
    pub fn fences(&self) -> impl Iterator<Item = (FenceId, &Fence)> {
        self.fences
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|fence| (FenceId(index), fence)))
    }

    /// Returns the amount of fences in the graph.
    pub fn fence_count(&self) -> usize {
        self.fences().count()
    }

    /// Returns an iterator over all the fences ending at the given vertex.
    pub fn fences_at(&self, vertex: VertexId) -> impl Iterator<Item = (FenceId, &Fence)> {
        self.fences().filter(move |(_, fence)| fence.connects(vertex))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.registry.get(id)
    }

    /// Returns the amount of fences ending at the given vertex.
    pub fn connection_count(&self, vertex: VertexId) -> usize {
        self.registry.degree(vertex)
    }

    /// Returns the positions of the endpoints of the given fence.
    pub fn endpoints(&self, fence: &Fence) -> Option<[Point; 2]> {
        Some([
            self.registry.position(fence.start)?,
            self.registry.position(fence.end)?,
        ])
    }

    /// Returns an iterator over the vertices a new fence may continue from: those with a
    /// single fence ending at them.
    pub fn connection_points(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.registry.iter().filter(|(_, vertex)| vertex.degree() == 1)
    }

    /// Returns the connection point closest to the given point within the given radius, if any.
    pub fn nearest_connection_point(
        &self,
        point: &Point,
        radius: f64,
    ) -> Option<(VertexId, Point)> {
        self.connection_points()
            .map(|(id, vertex)| (id, vertex.position, vertex.position.distance(point)))
            .filter(|(_, _, distance)| *distance <= radius)
            .min_by(|(_, _, a), (_, _, b)| a.total_cmp(b))
            .map(|(id, position, _)| (id, position))
    }

    /// Adds a fence between the given points, creating their vertices if needed.
    ///
    /// The fence must satisfy [`Graph::validate_fence_placement`]. Nothing changes on error.
    pub fn add_fence(&mut self, start: &Point, end: &Point) -> Result<FenceId, Error> {
        let [from, to] = self.candidate(start, end)?;
        if let Err(violation) = self.check_segment(&from, &to, &[]) {
            tracing::trace!(%violation, ?from, ?to, "fence rejected");
            return Err(violation.into());
        }

        Ok(self.commit(&from, &to, FenceKind::Standard))
    }

    /// Adds a fence between the given points without validating its placement.
    ///
    /// Meant for replaying fences that were already validated before being persisted.
    pub fn restore_fence(
        &mut self,
        start: &Point,
        end: &Point,
        kind: FenceKind,
    ) -> Result<FenceId, Error> {
        let [from, to] = self.candidate(start, end)?;
        Ok(self.commit(&from, &to, kind))
    }

    /// Removes the given fence, together with any endpoint no longer referenced by anything.
    pub fn remove_fence(&mut self, id: FenceId) -> Result<Removal, Error> {
        let was_enclosed = self.is_enclosed();
        let fence = self
            .fences
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(Error::UnknownFence(id))?;

        for vertex in [fence.start, fence.end] {
            self.registry.decrement(vertex);
            self.registry.remove_orphan(vertex);
        }

        tracing::debug!(fence = %id, was_enclosed, "fence removed");
        Ok(Removal {
            fence,
            was_enclosed,
        })
    }

    /// Replaces the endpoint `old` of the given fence by `new`, removing `old` if nothing
    /// references it anymore.
    ///
    /// Element anchors are not fence vertices, so they are never a valid `new`.
    pub fn replace_endpoint(
        &mut self,
        id: FenceId,
        old: VertexId,
        new: VertexId,
    ) -> Result<&Fence, Error> {
        let fence = *self.fence(id).ok_or(Error::UnknownFence(id))?;
        if self.registry.get(new).is_none_or(Vertex::is_anchor) {
            return Err(Error::UnknownVertex(new));
        }

        let Some(other) = fence.other(old) else {
            return Err(Error::VertexNotOnFence { fence: id, vertex: old });
        };

        if other == new {
            return Err(Error::DegenerateFence);
        }

        if old != new {
            let replaced = Fence {
                start: if fence.start == old { new } else { fence.start },
                end: if fence.end == old { new } else { fence.end },
                kind: fence.kind,
            };

            self.fences[id.0] = Some(replaced);
            self.registry.increment(new);
            self.registry.decrement(old);
            self.registry.remove_orphan(old);
            tracing::debug!(fence = %id, %old, %new, "fence endpoint replaced");
        }

        self.fence(id).ok_or(Error::UnknownFence(id))
    }

    /// Splits the given fence in two at the point of it that is the closest to the given one.
    ///
    /// The original fence keeps the endpoint that is the closest to the split point, preferring
    /// its start on ties, while a new fence of the same kind joins the split point with the
    /// other endpoint. Only the new fence is validated.
    pub fn split_fence(&mut self, id: FenceId, at: &Point) -> Result<Split, Error> {
        let fence = *self.fence(id).ok_or(Error::UnknownFence(id))?;
        let [start, end] = self.endpoints(&fence).ok_or(Error::UnknownFence(id))?;

        let point = self
            .registry
            .snap(&Segment::new(&start, &end).closest_point(at));

        let tolerance = self.config.tolerance();
        if point.is_close(&start, &tolerance) || point.is_close(&end, &tolerance) {
            return Err(Error::DegenerateFence);
        }

        let keeps_start = start.distance(&point) <= end.distance(&point);
        let (released, released_position) = if keeps_start {
            (fence.end, end)
        } else {
            (fence.start, start)
        };

        if let Err(violation) = self.check_segment(&point, &released_position, &[id]) {
            tracing::trace!(%violation, fence = %id, ?point, "split rejected");
            return Err(violation.into());
        }

        let vertex = self.registry.resolve(&point);
        let new = if keeps_start {
            self.connect(vertex, fence.end, fence.kind)
        } else {
            self.connect(fence.start, vertex, fence.kind)
        };

        self.replace_endpoint(id, released, vertex)?;
        tracing::debug!(fence = %id, %new, %vertex, "fence split");
        Ok(Split {
            kept: id,
            new,
            vertex,
        })
    }

    /// Moves the given vertex, and so every fence ending at it, to the given point.
    ///
    /// Every moved fence must keep satisfying the placement rules. Nothing changes on error.
    pub fn move_vertex(&mut self, id: VertexId, to: &Point) -> Result<(), Error> {
        let current = self.registry.position(id).ok_or(Error::UnknownVertex(id))?;
        let target = to.round();
        if target == current {
            return Ok(());
        }

        if let Some(other) = self.registry.locate(&target)
            && other != id
        {
            return Err(Error::Occupied(other));
        }

        let incident: Vec<(FenceId, Point)> = self
            .fences_at(id)
            .filter_map(|(fence_id, fence)| {
                let other = fence.other(id)?;
                Some((fence_id, self.registry.position(other)?))
            })
            .collect();

        let moved: Vec<FenceId> = incident.iter().map(|(fence_id, _)| *fence_id).collect();
        let check = || {
            for (_, other) in &incident {
                self.check_segment(&target, other, &moved)?;
            }

            self.check_corners(&target, incident.iter().map(|(_, other)| other))
        };

        if let Err(violation) = check() {
            tracing::trace!(%violation, vertex = %id, ?target, "vertex move rejected");
            return Err(violation.into());
        }

        self.registry.relocate(id, &target);
        tracing::debug!(vertex = %id, x = target.x, y = target.y, "vertex moved");
        Ok(())
    }

    /// Changes the kind of the given fence.
    pub fn set_fence_kind(&mut self, id: FenceId, kind: FenceKind) -> Result<(), Error> {
        let fence = self
            .fences
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownFence(id))?;

        fence.kind = kind;
        Ok(())
    }

    /// Registers a vertex at the given point owned by a single element, kept alive until
    /// released.
    pub(crate) fn anchor(&mut self, point: &Point) -> VertexId {
        self.registry.allocate_anchor(point)
    }

    /// Releases an anchor acquired by [`Graph::anchor`].
    pub(crate) fn release(&mut self, id: VertexId) {
        self.registry.release(id);
        self.registry.remove_orphan(id);
    }

    /// Returns the snapped endpoints of a candidate fence between the given points.
    fn candidate(&self, start: &Point, end: &Point) -> Result<[Point; 2], Error> {
        let [from, to] = [self.registry.snap(start), self.registry.snap(end)];
        if from.is_close(&to, &self.config.tolerance()) {
            return Err(Error::DegenerateFence);
        }

        Ok([from, to])
    }

    /// Registers a fence between the given positions, resolving their vertices.
    fn commit(&mut self, from: &Point, to: &Point, kind: FenceKind) -> FenceId {
        let start = self.registry.resolve(from);
        let end = self.registry.resolve(to);
        self.connect(start, end, kind)
    }

    /// Registers a fence between the given vertices.
    fn connect(&mut self, start: VertexId, end: VertexId, kind: FenceKind) -> FenceId {
        let id = FenceId(self.fences.len());
        self.fences.push(Some(Fence { start, end, kind }));
        self.registry.increment(start);
        self.registry.increment(end);

        tracing::debug!(fence = %id, %start, %end, "fence added");
        id
    }
}
