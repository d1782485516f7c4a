//! Concrete shapes and their pairwise collision tests.
//!
//! ## Rust Lesson #5: Traits With a Default Type Parameter
//!
//! `Collides<Rhs = Self>` reads as "can test collisions against `Rhs`,
//! which is `Self` unless you say otherwise". Each concrete pair gets its
//! own `impl`, so `polygon.collides(&circle)` picks the right test at
//! compile time with no runtime type checks.

use crate::error::CollisionError;
use crate::geometry::{Point, Segment};
use crate::intersect::{circles_intersect, is_exact_zero, segment_intersects_circle};

/// An ordered chain of points joined by straight segments.
///
/// Called a polygon, but it is really a polyline: it only becomes a loop
/// when `closed` is set, in which case the last point connects back to the
/// first. The point list is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
    closed: bool,
}

/// A disk given by its center and radius.
///
/// The squared radius is stored because every test compares squared
/// distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point,
    radius_squared: f64,
}

/// Pairwise collision test between two shape types.
pub trait Collides<Rhs: ?Sized = Self> {
    /// Whether `self` and `rhs` touch or overlap.
    ///
    /// # Errors
    /// [`CollisionError::DegenerateInput`] when a polygon edge has zero length.
    fn collides(&self, rhs: &Rhs) -> Result<bool, CollisionError>;
}

// ============================================================================
// POLYGON
// ============================================================================

impl Polygon {
    /// Build a polyline from at least two points.
    ///
    /// # Errors
    /// [`CollisionError::Construction`] with fewer than two points or any
    /// non-finite coordinate.
    pub fn new(points: Vec<Point>, closed: bool) -> Result<Self, CollisionError> {
        if points.len() < 2 {
            return Err(CollisionError::Construction(
                "a polygon needs at least two points".to_string(),
            ));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(CollisionError::Construction(format!(
                "polygon point ({}, {}) is not finite",
                bad.x, bad.y
            )));
        }
        Ok(Self { points, closed })
    }

    /// An open polyline (no edge from the last point back to the first).
    pub fn open(points: Vec<Point>) -> Result<Self, CollisionError> {
        Self::new(points, false)
    }

    /// A closed loop.
    pub fn closed(points: Vec<Point>) -> Result<Self, CollisionError> {
        Self::new(points, true)
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of edges: `n - 1` when open, `n` when closed.
    #[inline]
    pub fn edge_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Iterate over the edges.
    ///
    /// Edges join `points[i]` to `points[i + 1]`. A closed polygon adds one
    /// more edge from the last point back to the first.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        // ## Rust Lesson #9: bool::then + chain
        //
        // `closed.then(|| x)` is `Some(x)` when true, `None` otherwise.
        // An Option is also an iterator of zero or one items, so it can be
        // chained straight onto the window iterator.
        let wrap = self.closed.then(|| {
            Segment::new(self.points[self.points.len() - 1], self.points[0])
        });

        self.points
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .chain(wrap)
    }
}

impl Collides for Polygon {
    fn collides(&self, rhs: &Polygon) -> Result<bool, CollisionError> {
        // Checked up front so an early hit can't skip a bad edge, which would
        // make the answer depend on argument order.
        if self.segments().chain(rhs.segments()).any(|edge| edge.is_degenerate()) {
            return Err(CollisionError::DegenerateInput);
        }

        for ours in self.segments() {
            for theirs in rhs.segments() {
                if ours.intersects(&theirs)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

impl Collides<Circle> for Polygon {
    fn collides(&self, rhs: &Circle) -> Result<bool, CollisionError> {
        if self.segments().any(|edge| is_exact_zero(edge.direction().square_norm())) {
            return Err(CollisionError::DegenerateInput);
        }

        for edge in self.segments() {
            if segment_intersects_circle(rhs, edge.start, edge.end)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

// ============================================================================
// CIRCLE
// ============================================================================

impl Circle {
    /// Build a circle. A radius of zero is allowed and acts as a point.
    ///
    /// # Errors
    /// [`CollisionError::Construction`] for a negative or non-finite radius,
    /// or a non-finite center.
    pub fn new(center: Point, radius: f64) -> Result<Self, CollisionError> {
        if !center.is_finite() {
            return Err(CollisionError::Construction(format!(
                "circle center ({}, {}) is not finite",
                center.x, center.y
            )));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(CollisionError::Construction(format!(
                "circle radius {} must be a finite, non-negative number",
                radius
            )));
        }
        Ok(Self { center, radius_squared: radius * radius })
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius_squared.sqrt()
    }

    #[inline]
    pub fn radius_squared(&self) -> f64 {
        self.radius_squared
    }
}

impl Collides for Circle {
    #[inline]
    fn collides(&self, rhs: &Circle) -> Result<bool, CollisionError> {
        Ok(circles_intersect(self, rhs))
    }
}

impl Collides<Polygon> for Circle {
    /// Same answer as `polygon.collides(circle)`.
    #[inline]
    fn collides(&self, rhs: &Polygon) -> Result<bool, CollisionError> {
        rhs.collides(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn square() -> Vec<Point> {
        pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
    }

    #[test]
    fn polygon_needs_two_points() {
        assert!(matches!(
            Polygon::open(pts(&[(1.0, 1.0)])),
            Err(CollisionError::Construction(_))
        ));
        assert!(matches!(Polygon::closed(vec![]), Err(CollisionError::Construction(_))));
        assert!(Polygon::open(pts(&[(0.0, 0.0), (1.0, 0.0)])).is_ok());
    }

    #[test]
    fn polygon_rejects_nan() {
        let result = Polygon::open(pts(&[(0.0, 0.0), (f64::NAN, 1.0)]));
        assert!(matches!(result, Err(CollisionError::Construction(_))));
    }

    #[test]
    fn open_square_has_three_edges() {
        let poly = Polygon::open(square()).unwrap();
        assert_eq!(poly.edge_count(), 3);

        let edges: Vec<Segment> = poly.segments().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0], Segment::new(Point::new(0.0, 0.0), Point::new(0.0, 1.0)));
        assert_eq!(edges[2], Segment::new(Point::new(1.0, 1.0), Point::new(1.0, 0.0)));
    }

    #[test]
    fn closed_square_wraps_around() {
        let poly = Polygon::closed(square()).unwrap();
        assert_eq!(poly.edge_count(), 4);

        let edges: Vec<Segment> = poly.segments().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], Segment::new(Point::new(1.0, 0.0), Point::new(0.0, 0.0)));
    }

    #[test]
    fn two_point_closed_polygon_has_two_edges() {
        let poly = Polygon::closed(pts(&[(0.0, 0.0), (1.0, 0.0)])).unwrap();
        assert_eq!(poly.segments().count(), 2);
    }

    #[test]
    fn circle_accessors() {
        let c = Circle::new(Point::new(1.0, 2.0), 3.0).unwrap();
        assert_eq!(c.center(), Point::new(1.0, 2.0));
        assert_eq!(c.radius_squared(), 9.0);
        assert_eq!(c.radius(), 3.0);
    }

    #[test]
    fn circle_rejects_bad_radius() {
        let origin = Point::new(0.0, 0.0);
        assert!(matches!(Circle::new(origin, -1.0), Err(CollisionError::Construction(_))));
        assert!(matches!(Circle::new(origin, f64::NAN), Err(CollisionError::Construction(_))));
        assert!(Circle::new(origin, 0.0).is_ok());
    }

    #[test]
    fn polylines_crossing() {
        let a = Polygon::open(pts(&[(0.0, 0.0), (0.0, 2.0), (3.0, 2.0)])).unwrap();
        let b = Polygon::open(pts(&[(1.0, 0.0), (1.0, 3.0), (4.0, 3.0)])).unwrap();
        assert_eq!(a.collides(&b), Ok(true));
        assert_eq!(b.collides(&a), Ok(true));
    }

    #[test]
    fn open_squares_miss_through_the_gap() {
        let b = pts(&[(0.5, 0.5), (0.5, -0.5), (1.5, -0.5), (1.5, 0.5)]);
        let a_open = Polygon::open(square()).unwrap();
        let a_closed = Polygon::closed(square()).unwrap();
        let b_open = Polygon::open(b.clone()).unwrap();
        let b_closed = Polygon::closed(b).unwrap();

        assert_eq!(a_open.collides(&b_open), Ok(false));
        assert_eq!(a_open.collides(&b_closed), Ok(true));
        assert_eq!(a_closed.collides(&b_open), Ok(true));
        assert_eq!(a_closed.collides(&b_closed), Ok(true));
    }

    #[test]
    fn polygon_vs_circle_both_ways() {
        let c = Circle::new(Point::new(0.0, 0.0), 1.0).unwrap();
        let near = Polygon::open(pts(&[(-2.0, 0.5), (2.0, 0.5)])).unwrap();
        let far = Polygon::open(pts(&[(-2.0, 2.0), (2.0, 2.0)])).unwrap();

        assert_eq!(near.collides(&c), Ok(true));
        assert_eq!(c.collides(&near), Ok(true));
        assert_eq!(far.collides(&c), Ok(false));
        assert_eq!(c.collides(&far), Ok(false));
    }

    #[test]
    fn degenerate_edge_surfaces_as_error() {
        // Repeated point gives a zero-length edge.
        let a = Polygon::open(pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0)])).unwrap();
        let b = Polygon::open(pts(&[(0.0, 1.0), (1.0, 0.0)])).unwrap();
        assert_eq!(a.collides(&b), Err(CollisionError::DegenerateInput));

        let c = Circle::new(Point::new(5.0, 5.0), 1.0).unwrap();
        assert_eq!(a.collides(&c), Err(CollisionError::DegenerateInput));
    }

    #[test]
    fn degenerate_edge_after_a_hit_still_fails() {
        // The first edge of `a` crosses `b`; the zero-length edge comes last.
        let a = Polygon::open(pts(&[(0.0, -1.0), (0.0, 1.0), (0.0, 1.0)])).unwrap();
        let b = Polygon::open(pts(&[(5.0, 5.0), (5.0, 0.0), (-1.0, 0.0)])).unwrap();
        assert_eq!(a.collides(&b), Err(CollisionError::DegenerateInput));
        assert_eq!(b.collides(&a), Err(CollisionError::DegenerateInput));

        let c = Circle::new(Point::new(0.0, 0.0), 0.5).unwrap();
        assert_eq!(a.collides(&c), Err(CollisionError::DegenerateInput));
        assert_eq!(c.collides(&a), Err(CollisionError::DegenerateInput));
    }

    #[test]
    fn circles_collide_by_value() {
        let a = Circle::new(Point::new(0.0, 0.0), 1.0).unwrap();
        let b = Circle::new(Point::new(2.0, 0.0), 1.5).unwrap();
        assert_eq!(a.collides(&b), Ok(true));
        assert_eq!(b.collides(&a), Ok(true));
    }
}
