use num_traits::Float;

use crate::{Distance, IsClose, Tolerance};

/// A point in the plan-local pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T = f64> {
    /// The horizontal coordinate of the point.
    pub x: T,
    /// The vertical coordinate of the point, growing downwards.
    pub y: T,
}

impl<T> From<[T; 2]> for Point<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self { x, y }
    }
}

impl<T> Distance for Point<T>
where
    T: Copy + Float,
{
    type Distance = T;

    fn distance(&self, rhs: &Self) -> Self::Distance {
        ((self.x - rhs.x).powi(2) + (self.y - rhs.y).powi(2)).sqrt()
    }
}

impl<T> IsClose for Point<T>
where
    T: IsClose<Tolerance = Tolerance<T>> + Copy,
{
    type Tolerance = Tolerance<T>;

    fn is_close(&self, rhs: &Self, tolerance: &Self::Tolerance) -> bool {
        self.x.is_close(&rhs.x, tolerance) && self.y.is_close(&rhs.y, tolerance)
    }
}

impl<T> Point<T>
where
    T: Float,
{
    /// Returns the point with both coordinates rounded to the nearest integer pixel.
    pub fn round(&self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }

    /// Returns the dot product of self and rhs as vectors.
    pub(crate) fn dot(&self, rhs: &Self) -> T {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Returns the z component of the cross product of self and rhs as vectors.
    pub(crate) fn cross(&self, rhs: &Self) -> T {
        self.x * rhs.y - self.y * rhs.x
    }

    /// Returns the vector going from self to rhs.
    pub(crate) fn to(&self, rhs: &Self) -> Self {
        Self {
            x: rhs.x - self.x,
            y: rhs.y - self.y,
        }
    }

    /// Returns the length of self as a vector.
    pub(crate) fn norm(&self) -> T {
        self.dot(self).sqrt()
    }
}

/// A constructor macro for the cartesian [`Point`].
#[macro_export]
macro_rules! cartesian_point {
    ($x:expr, $y:expr) => {
        $crate::cartesian::Point { x: $x, y: $y }
    };
}

pub use cartesian_point;
