use num_traits::{Float, FloatConst};

use crate::{Distance, IsClose, Tolerance, cartesian::Point};

/// The straight line between two endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a, T = f64> {
    /// The first point in the segment.
    pub from: &'a Point<T>,
    /// The last point in the segment.
    pub to: &'a Point<T>,
}

impl<'a, T> Segment<'a, T> {
    pub fn new(from: &'a Point<T>, to: &'a Point<T>) -> Self {
        Self { from, to }
    }
}

impl<T> Segment<'_, T>
where
    T: Float,
{
    /// Returns the distance between the two endpoints of the segment.
    pub fn length(&self) -> T {
        self.from.distance(self.to)
    }

    /// Returns true if, and only if, any endpoint of self is close to any endpoint of rhs.
    pub fn shares_endpoint(&self, rhs: &Segment<'_, T>, tolerance: &Tolerance<T>) -> bool {
        [self.from, self.to]
            .into_iter()
            .any(|endpoint| {
                endpoint.is_close(rhs.from, tolerance) || endpoint.is_close(rhs.to, tolerance)
            })
    }

    /// Returns true if, and only if, the interiors of self and rhs cross each other.
    ///
    /// Segments sharing an endpoint never cross, nor do parallel ones, even when collinear and
    /// overlapping. Touching the interior of one segment with the endpoint of the other is not
    /// a crossing either.
    pub fn crosses(&self, rhs: &Segment<'_, T>, tolerance: &Tolerance<T>) -> bool {
        if self.shares_endpoint(rhs, tolerance) {
            return false;
        }

        let Some([t, u]) = self.parameters(rhs, tolerance) else {
            return false;
        };

        let open = |value: T| value > T::zero() && value < T::one();
        open(t) && open(u)
    }

    /// Returns true if, and only if, self and rhs have at least one point in common, including
    /// their endpoints and any collinear overlap.
    pub fn touches(&self, rhs: &Segment<'_, T>, tolerance: &Tolerance<T>) -> bool {
        if self.contains(rhs.from, tolerance)
            || self.contains(rhs.to, tolerance)
            || rhs.contains(self.from, tolerance)
            || rhs.contains(self.to, tolerance)
        {
            return true;
        }

        let Some([t, u]) = self.parameters(rhs, tolerance) else {
            // Parallel segments not containing each other's endpoints are disjoint.
            return false;
        };

        let closed = |value: T| value >= T::zero() && value <= T::one();
        closed(t) && closed(u)
    }

    /// Returns true if, and only if, the given point lies on self.
    pub fn contains(&self, point: &Point<T>, tolerance: &Tolerance<T>) -> bool {
        self.closest_point(point).is_close(point, tolerance)
    }

    /// Returns the point of self that is the closest to the given one.
    pub fn closest_point(&self, point: &Point<T>) -> Point<T> {
        let direction = self.from.to(self.to);
        let squared_length = direction.dot(&direction);
        if squared_length.is_zero() {
            return *self.from;
        }

        let t = (self.from.to(point).dot(&direction) / squared_length)
            .max(T::zero())
            .min(T::one());

        Point {
            x: self.from.x + t * direction.x,
            y: self.from.y + t * direction.y,
        }
    }

    /// Returns the parameters `[t, u]` locating the intersection of the lines through self and
    /// rhs, such that it equals `self.from + t * (self.to - self.from)` and
    /// `rhs.from + u * (rhs.to - rhs.from)`; or [`None`] if they are parallel.
    fn parameters(&self, rhs: &Segment<'_, T>, tolerance: &Tolerance<T>) -> Option<[T; 2]> {
        let (direction, rhs_direction) = (self.from.to(self.to), rhs.from.to(rhs.to));
        let determinant = direction.cross(&rhs_direction);
        if determinant.is_close(&T::zero(), tolerance) {
            return None;
        }

        let offset = self.from.to(rhs.from);
        let t = offset.cross(&rhs_direction) / determinant;
        let u = offset.cross(&direction) / determinant;

        Some([t, u])
    }
}

impl<T> Segment<'_, T>
where
    T: Float + FloatConst,
{
    /// Returns the turn angle, in degrees within `[0, 180]`, between the direction of self and
    /// the direction of rhs.
    ///
    /// When self ends where rhs starts, this is the angle formed by both segments at the shared
    /// point: 180 for a straight continuation and close to zero when rhs folds back onto self.
    /// Degenerated segments yield zero.
    pub fn angle(&self, rhs: &Segment<'_, T>) -> T {
        let (u, v) = (self.from.to(self.to), rhs.from.to(rhs.to));
        let (u_norm, v_norm) = (u.norm(), v.norm());
        if u_norm <= T::epsilon() || v_norm <= T::epsilon() {
            return T::zero();
        }

        let cosine = (u.dot(&v) / (u_norm * v_norm)).max(-T::one()).min(T::one());
        (T::PI() - cosine.acos()).to_degrees()
    }
}
