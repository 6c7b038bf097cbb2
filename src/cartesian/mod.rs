//! Stateless planar geometry in plan-local pixel coordinates.

mod point;
mod polygon;
mod rect;
mod segment;

use num_traits::{Float, FloatConst};

pub use self::point::Point;
pub use self::polygon::Polygon;
pub use self::rect::Rect;
pub use self::segment::Segment;

use crate::Tolerance;

/// Returns true if, and only if, the open segments `a1a2` and `b1b2` cross each other.
///
/// See [`Segment::crosses`].
pub fn segments_intersect<T>(
    [a1, a2]: [&Point<T>; 2],
    [b1, b2]: [&Point<T>; 2],
    tolerance: &Tolerance<T>,
) -> bool
where
    T: Float,
{
    Segment::new(a1, a2).crosses(&Segment::new(b1, b2), tolerance)
}

/// Returns the turn angle, in degrees, between the directions of two segments.
///
/// See [`Segment::angle`].
pub fn angle_between<T>([a1, a2]: [&Point<T>; 2], [b1, b2]: [&Point<T>; 2]) -> T
where
    T: Float + FloatConst,
{
    Segment::new(a1, a2).angle(&Segment::new(b1, b2))
}

/// Returns the area enclosed by the given ordered points.
pub fn shoelace_area<T>(points: &[Point<T>]) -> T
where
    T: Float,
{
    Polygon::from(points.to_vec()).area()
}

/// Returns true if, and only if, the given point is inside the polygon described by the ordered
/// points.
///
/// See [`Polygon::contains`] for the boundary convention.
pub fn point_in_polygon<T>(point: &Point<T>, points: &[Point<T>]) -> bool
where
    T: Float,
{
    Polygon::from(points.to_vec()).contains(point)
}

/// Returns the point of the segment `from`-`to` that is the closest to the given one.
pub fn closest_point_on_segment<T>(from: &Point<T>, to: &Point<T>, point: &Point<T>) -> Point<T>
where
    T: Float,
{
    Segment::new(from, to).closest_point(point)
}

#[cfg(test)]
mod tests {
    use crate::{
        Tolerance,
        cartesian::{
            Point, angle_between, closest_point_on_segment, point_in_polygon, segments_intersect,
            shoelace_area,
        },
    };

    fn unit_square() -> Vec<Point> {
        vec![
            [0., 0.].into(),
            [100., 0.].into(),
            [100., 100.].into(),
            [0., 100.].into(),
        ]
    }

    #[test]
    fn kernel_functions() {
        let tolerance = Tolerance::absolute(0.001);
        let square = unit_square();

        assert!(segments_intersect(
            [&[0., 0.].into(), &[10., 10.].into()],
            [&[0., 10.].into(), &[10., 0.].into()],
            &tolerance
        ));
        assert!(!segments_intersect(
            [&square[0], &square[1]],
            [&square[1], &square[2]],
            &tolerance
        ));

        let angle = angle_between([&square[0], &square[1]], [&square[1], &square[2]]);
        assert!((angle - 90.).abs() < 1e-9);

        assert_eq!(shoelace_area(&square), 10_000.);
        let mut reversed = square.clone();
        reversed.reverse();
        assert_eq!(shoelace_area(&reversed), 10_000.);

        assert!(point_in_polygon(&[50., 50.].into(), &square));
        assert!(!point_in_polygon(&[150., 50.].into(), &square));

        let got = closest_point_on_segment(&square[0], &square[1], &[30., 40.].into());
        assert_eq!(got, Point::from([30., 0.]));
    }
}
