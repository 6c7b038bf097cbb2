use crate::{
    Error, FenceId, Graph, VertexId,
    cartesian::{Point, Polygon},
};

/// Yields the vertices of a [`Graph`] in the order they are found when walking its fences from
/// an initial vertex, until returning to it.
///
/// The walk only makes sense when every vertex has exactly two fences ending at it; otherwise it
/// stops early and the cycle is reported as incomplete.
pub struct Cycle<'a> {
    graph: &'a Graph,
    /// The fences already walked through, indexed by fence slot.
    used: Vec<bool>,
    start: Option<VertexId>,
    next: Option<VertexId>,
    /// The amount of fences walked through so far.
    steps: usize,
    /// Upper bound of steps, guarding against endless walks.
    limit: usize,
    closed: bool,
}

impl Iterator for Cycle<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if self.steps >= self.limit {
            return None;
        }

        let following = self
            .graph
            .fences_at(current)
            .find(|(id, _)| !self.used[id.0])
            .and_then(|(id, fence)| Some((id, fence.other(current)?)));

        if let Some((id, vertex)) = following {
            self.used[id.0] = true;
            self.steps += 1;

            if Some(vertex) == self.start {
                self.closed = true;
            } else {
                self.next = Some(vertex);
            }
        }

        Some(current)
    }
}

impl Cycle<'_> {
    /// Returns true if, and only if, the walk has returned to its initial vertex after going
    /// through every fence in the graph.
    pub fn is_complete(&self) -> bool {
        self.closed && self.steps == self.graph.fence_count()
    }

    /// Returns all the vertices of the cycle if, and only if, it is complete.
    pub fn into_vertices(mut self) -> Result<Vec<VertexId>, Error> {
        let vertices = self.by_ref().collect::<Vec<_>>();
        if !self.is_complete() {
            return Err(Error::Incomplete);
        }

        Ok(vertices)
    }
}

impl Graph {
    /// Returns a walk starting at the start vertex of the first fence in the graph.
    pub fn cycle(&self) -> Cycle<'_> {
        let first = self.fences().next().map(|(id, _)| id);
        self.walk(first)
    }

    /// Returns a walk starting at the start vertex of the given fence.
    pub fn cycle_from(&self, fence: FenceId) -> Cycle<'_> {
        self.walk(self.fence(fence).map(|_| fence))
    }

    /// Returns true if, and only if, the graph has more than two vertices and every one of them
    /// has exactly two fences ending at it.
    ///
    /// Vertices only anchoring elements are not part of the fence graph and are ignored.
    pub fn is_closed(&self) -> bool {
        self.registry()
            .iter()
            .filter(|(_, vertex)| vertex.degree() > 0 || !vertex.is_anchor())
            .try_fold(0_usize, |count, (_, vertex)| (vertex.degree() == 2).then_some(count + 1))
            .is_some_and(|count| count > 2)
    }

    /// Returns the positions of the vertices in the order they are walked through.
    ///
    /// Callers must make sure the graph [is closed](Graph::is_closed) before trusting the
    /// result.
    pub fn ordered_cycle(&self) -> Result<Vec<Point>, Error> {
        self.cycle()
            .into_vertices()?
            .into_iter()
            .map(|id| self.registry().position(id).ok_or(Error::UnknownVertex(id)))
            .collect()
    }

    /// Returns the polygon described by the fences if, and only if, they form a single closed
    /// cycle.
    pub fn polygon(&self) -> Option<Polygon> {
        if !self.is_closed() {
            return None;
        }

        match self.ordered_cycle() {
            Ok(vertices) => Some(vertices.into()),
            Err(error) => {
                tracing::error!(%error, "closed graph does not form a single cycle");
                None
            }
        }
    }

    /// Returns true if, and only if, the fences form a single closed cycle.
    pub fn is_enclosed(&self) -> bool {
        self.polygon().is_some()
    }

    /// Returns the area, in squared meters, enclosed by the fences; or zero if they are not
    /// enclosing anything.
    pub fn enclosed_area(&self) -> f64 {
        self.polygon()
            .map(|polygon| self.config().square_meters(polygon.area()))
            .unwrap_or_default()
    }

    fn walk(&self, fence: Option<FenceId>) -> Cycle<'_> {
        let start = fence.and_then(|id| self.fence(id)).map(|fence| fence.start);
        let fences = self.fence_count();

        Cycle {
            graph: self,
            used: vec![false; self.fences.len()],
            start,
            next: start,
            steps: 0,
            limit: 2 * fences,
            closed: false,
        }
    }
}
