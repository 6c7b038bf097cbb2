use num_traits::Float;

use crate::cartesian::{Point, Segment};

/// A polygon in the plain.
#[derive(Debug, Clone)]
pub struct Polygon<T = f64> {
    /// The ordered list of vertices describing the polygon.
    pub vertices: Vec<Point<T>>,
}

impl<T, P> From<Vec<P>> for Polygon<T>
where
    P: Into<Point<T>>,
{
    fn from(vertices: Vec<P>) -> Self {
        Self {
            vertices: vertices.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T> PartialEq for Polygon<T>
where
    T: Clone + PartialEq,
{
    /// Two polygons are equal if, and only if, they have the same vertices describing the same
    /// boundary, no matter which one comes first.
    fn eq(&self, other: &Self) -> bool {
        let len = self.vertices.len();
        if len != other.vertices.len() {
            return false;
        }

        let mut double = other.vertices.clone();
        double.extend_from_slice(&other.vertices);

        (0..len.max(1)).any(|padding| double[padding..padding + len] == self.vertices[..])
    }
}

impl<T> IntoIterator for Polygon<T> {
    type Item = Point<T>;
    type IntoIter = std::vec::IntoIter<Point<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.into_iter()
    }
}

impl<T> Polygon<T> {
    /// Returns the amount of vertices in the polygon.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the polygon with the reversed order of vertices.
    pub fn reversed(mut self) -> Self {
        self.vertices.reverse();
        self
    }

    /// Returns an ordered iterator over all the vertices of the polygon.
    ///
    /// By definition, a polygon is a closed shape, hence the latest point of the iterator equals
    /// the very first.
    fn vertices(&self) -> impl Iterator<Item = &Point<T>> {
        self.vertices.iter().chain(self.vertices.first())
    }

    /// Returns an ordered iterator over all the segments of the polygon.
    pub fn edges(&self) -> impl Iterator<Item = Segment<'_, T>> {
        self.vertices()
            .zip(self.vertices().skip(1))
            .map(|(from, to)| Segment { from, to })
    }
}

impl<T> Polygon<T>
where
    T: Float,
{
    /// Returns the area enclosed by the polygon, regardless of its orientation.
    pub fn area(&self) -> T {
        let two = T::one() + T::one();
        self.edges()
            .fold(T::zero(), |area, segment| area + segment.from.cross(segment.to))
            .abs()
            / two
    }

    /// Returns true if, and only if, the given point is inside the polygon.
    ///
    /// Uses the parity of the crossings of a horizontal ray going right from the point. Points
    /// lying on a left or top boundary count as inside, while those on a right or bottom one
    /// count as outside. Polygons with less than three vertices contain no point.
    pub fn contains(&self, point: &Point<T>) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }

        self.edges()
            .filter(|segment| (segment.from.y > point.y) != (segment.to.y > point.y))
            .filter(|segment| {
                let crossing = segment.from.x
                    + (point.y - segment.from.y) * (segment.to.x - segment.from.x)
                        / (segment.to.y - segment.from.y);

                point.x < crossing
            })
            .count()
            % 2
            == 1
    }
}
