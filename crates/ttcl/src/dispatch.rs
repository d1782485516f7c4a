//! Collision queries between shapes whose concrete type is not known.
//!
//! Two ways in:
//!
//! - [`Shape`] is the closed sum type over every shape we support. Matching
//!   on `(lhs, rhs)` picks the pairwise test, and the compiler complains if
//!   a new variant is added without covering every pair.
//! - [`Geometry`] is the open capability for `&dyn` callers. [`dispatch`]
//!   resolves the right-hand side to a concrete shape once, then calls the
//!   left-hand side's test for that shape. Implementors outside this crate
//!   that cannot be resolved are rejected with
//!   [`CollisionError::UnsupportedShape`].

use crate::error::CollisionError;
use crate::shape::{Circle, Collides, Polygon};

/// Any shape this crate knows how to test.
///
/// ## Rust Lesson #10: Enums (Sum Types)
///
/// Each variant carries its own data. A `match` over a pair of shapes has
/// to handle all four combinations; forget one and it won't compile.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Polygon),
    Circle(Circle),
}

/// A borrowed view of a [`Shape`] variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeRef<'a> {
    Polygon(&'a Polygon),
    Circle(&'a Circle),
}

/// The abstract shape capability.
///
/// Every shape must be able to test itself against every concrete variant.
/// Adding a variant means adding one method here and one impl per shape.
pub trait Geometry {
    /// Resolve to a concrete variant, or `None` for shapes the dispatcher
    /// does not know.
    fn resolve(&self) -> Option<ShapeRef<'_>> {
        None
    }

    fn collides_polygon(&self, rhs: &Polygon) -> Result<bool, CollisionError>;

    fn collides_circle(&self, rhs: &Circle) -> Result<bool, CollisionError>;

    /// Name used in error messages.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// `lhs.collides(rhs)` for two shapes known only as [`Geometry`].
///
/// # Errors
/// [`CollisionError::UnsupportedShape`] if `rhs` does not resolve to a
/// polygon or circle, plus anything the pairwise test returns.
pub fn dispatch(lhs: &dyn Geometry, rhs: &dyn Geometry) -> Result<bool, CollisionError> {
    match rhs.resolve() {
        Some(ShapeRef::Polygon(polygon)) => lhs.collides_polygon(polygon),
        Some(ShapeRef::Circle(circle)) => lhs.collides_circle(circle),
        None => Err(CollisionError::UnsupportedShape { name: rhs.name().to_string() }),
    }
}

impl dyn Geometry + '_ {
    /// Method form of [`dispatch`].
    pub fn collides_with(&self, rhs: &dyn Geometry) -> Result<bool, CollisionError> {
        dispatch(self, rhs)
    }
}

// ============================================================================
// SHAPE
// ============================================================================

impl Shape {
    pub fn as_shape_ref(&self) -> ShapeRef<'_> {
        match self {
            Shape::Polygon(polygon) => ShapeRef::Polygon(polygon),
            Shape::Circle(circle) => ShapeRef::Circle(circle),
        }
    }

    /// Lowercase variant name ("polygon" or "circle").
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Polygon(_) => "polygon",
            Shape::Circle(_) => "circle",
        }
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl Collides for Shape {
    fn collides(&self, rhs: &Shape) -> Result<bool, CollisionError> {
        match (self, rhs) {
            (Shape::Polygon(a), Shape::Polygon(b)) => a.collides(b),
            (Shape::Polygon(a), Shape::Circle(b)) => a.collides(b),
            (Shape::Circle(a), Shape::Polygon(b)) => a.collides(b),
            (Shape::Circle(a), Shape::Circle(b)) => a.collides(b),
        }
    }
}

// ============================================================================
// GEOMETRY IMPLS
// ============================================================================

impl Geometry for Polygon {
    fn resolve(&self) -> Option<ShapeRef<'_>> {
        Some(ShapeRef::Polygon(self))
    }

    fn collides_polygon(&self, rhs: &Polygon) -> Result<bool, CollisionError> {
        self.collides(rhs)
    }

    fn collides_circle(&self, rhs: &Circle) -> Result<bool, CollisionError> {
        self.collides(rhs)
    }

    fn name(&self) -> &str {
        "polygon"
    }
}

impl Geometry for Circle {
    fn resolve(&self) -> Option<ShapeRef<'_>> {
        Some(ShapeRef::Circle(self))
    }

    fn collides_polygon(&self, rhs: &Polygon) -> Result<bool, CollisionError> {
        self.collides(rhs)
    }

    fn collides_circle(&self, rhs: &Circle) -> Result<bool, CollisionError> {
        self.collides(rhs)
    }

    fn name(&self) -> &str {
        "circle"
    }
}

impl Geometry for Shape {
    fn resolve(&self) -> Option<ShapeRef<'_>> {
        Some(self.as_shape_ref())
    }

    fn collides_polygon(&self, rhs: &Polygon) -> Result<bool, CollisionError> {
        match self {
            Shape::Polygon(polygon) => polygon.collides(rhs),
            Shape::Circle(circle) => circle.collides(rhs),
        }
    }

    fn collides_circle(&self, rhs: &Circle) -> Result<bool, CollisionError> {
        match self {
            Shape::Polygon(polygon) => polygon.collides(rhs),
            Shape::Circle(circle) => circle.collides(rhs),
        }
    }

    fn name(&self) -> &str {
        self.kind()
    }
}
