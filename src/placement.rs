//! Legality checks for candidate fences and elements.

use crate::{
    FenceId, Graph, IsClose, Tolerance, Violation,
    cartesian::{Point, Rect, Segment},
};

impl Graph {
    /// Checks whether a fence could be placed between the given points.
    ///
    /// A fence is rejected with [`Violation::Angle`] when it forms an angle below the minimum
    /// with any fence it shares an endpoint with, and with [`Violation::Intersection`] when it
    /// crosses any other fence. The angle check always takes precedence.
    pub fn validate_fence_placement(&self, start: &Point, end: &Point) -> Result<(), Violation> {
        let from = self.registry().snap(start);
        let to = self.registry().snap(end);
        self.check_segment(&from, &to, &[])
    }

    /// Checks whether an element could be placed at the given rectangle without overlapping any
    /// fence.
    pub fn validate_element_placement(
        &self,
        top_left: &Point,
        width: f64,
        height: f64,
    ) -> Result<(), Violation> {
        let rect = Rect::new(*top_left, width, height);
        let tolerance = self.config().tolerance();

        let overlaps = self
            .fences()
            .filter_map(|(_, fence)| self.endpoints(fence))
            .any(|[start, end]| rect.overlaps(&Segment::new(&start, &end), &tolerance));

        if overlaps {
            return Err(Violation::Overlap);
        }

        Ok(())
    }

    /// Returns true if, and only if, the fences form a closed enclosure containing the given
    /// point.
    ///
    /// See [`Polygon::contains`](crate::cartesian::Polygon::contains) for points on the boundary.
    pub fn is_point_in_enclosure(&self, point: &Point) -> bool {
        self.polygon().is_some_and(|polygon| polygon.contains(point))
    }

    /// Checks the segment between the given points against every fence not in `skip`.
    pub(crate) fn check_segment(
        &self,
        from: &Point,
        to: &Point,
        skip: &[FenceId],
    ) -> Result<(), Violation> {
        let tolerance = self.config().tolerance();
        let candidate = Segment::new(from, to);
        let others: Vec<[Point; 2]> = self
            .fences()
            .filter(|(id, _)| !skip.contains(id))
            .filter_map(|(_, fence)| self.endpoints(fence))
            .collect();

        let too_sharp = others.iter().any(|[start, end]| {
            corner_angle(&candidate, &Segment::new(start, end), &tolerance)
                .is_some_and(|angle| angle < self.config().min_angle)
        });

        if too_sharp {
            return Err(Violation::Angle);
        }

        let crossing = others.iter().any(|[start, end]| {
            let existing = Segment::new(start, end);
            !existing.shares_endpoint(&candidate, &tolerance)
                && existing.crosses(&candidate, &tolerance)
        });

        if crossing {
            return Err(Violation::Intersection);
        }

        Ok(())
    }

    /// Checks the angles formed at the given vertex by every pair of segments joining it with
    /// the given points.
    pub(crate) fn check_corners<'a>(
        &self,
        vertex: &Point,
        others: impl Iterator<Item = &'a Point>,
    ) -> Result<(), Violation> {
        let others: Vec<&Point> = others.collect();
        let too_sharp = others.iter().enumerate().any(|(index, tail)| {
            others[index + 1..].iter().any(|head| {
                let angle = Segment::new(tail, vertex).angle(&Segment::new(vertex, head));
                angle < self.config().min_angle
            })
        });

        if too_sharp {
            return Err(Violation::Angle);
        }

        Ok(())
    }
}

/// Returns the angle formed by both segments at their first shared endpoint, if any.
fn corner_angle(
    segment: &Segment<'_>,
    rhs: &Segment<'_>,
    tolerance: &Tolerance<f64>,
) -> Option<f64> {
    [(segment.from, segment.to), (segment.to, segment.from)]
        .into_iter()
        .find_map(|(shared, tail)| {
            let head = if rhs.from.is_close(shared, tolerance) {
                rhs.to
            } else if rhs.to.is_close(shared, tolerance) {
                rhs.from
            } else {
                return None;
            };

            Some(Segment::new(tail, shared).angle(&Segment::new(shared, head)))
        })
}
