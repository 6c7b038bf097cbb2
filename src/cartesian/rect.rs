use num_traits::Float;

use crate::{
    Tolerance,
    cartesian::{Point, Segment},
};

/// An axis-aligned rectangle positioned by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T = f64> {
    pub top_left: Point<T>,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T>
where
    T: Float,
{
    pub fn new(top_left: Point<T>, width: T, height: T) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Returns the corners of the rectangle, clockwise from the top-left one.
    pub fn corners(&self) -> [Point<T>; 4] {
        let Point { x, y } = self.top_left;
        [
            Point { x, y },
            Point {
                x: x + self.width,
                y,
            },
            Point {
                x: x + self.width,
                y: y + self.height,
            },
            Point {
                x,
                y: y + self.height,
            },
        ]
    }

    pub fn center(&self) -> Point<T> {
        let two = T::one() + T::one();
        Point {
            x: self.top_left.x + self.width / two,
            y: self.top_left.y + self.height / two,
        }
    }

    /// Returns true if, and only if, the given point is inside the rectangle or on its boundary.
    pub fn contains(&self, point: &Point<T>) -> bool {
        let [min, _, max, _] = self.corners();
        point.x >= min.x.min(max.x)
            && point.x <= min.x.max(max.x)
            && point.y >= min.y.min(max.y)
            && point.y <= min.y.max(max.y)
    }

    /// Returns true if, and only if, the given segment has any point in common with the
    /// rectangle.
    ///
    /// That is, when the segment has an endpoint inside the rectangle, crosses any of its sides,
    /// or lies along one of them.
    pub fn overlaps(&self, segment: &Segment<'_, T>, tolerance: &Tolerance<T>) -> bool {
        if self.contains(segment.from) || self.contains(segment.to) {
            return true;
        }

        let corners = self.corners();
        (0..corners.len())
            .map(|index| Segment::new(&corners[index], &corners[(index + 1) % corners.len()]))
            .any(|side| side.touches(segment, tolerance))
    }
}
