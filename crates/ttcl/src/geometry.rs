//! Core value types: points, vectors and segments.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! `#[derive(Debug, Clone, Copy, PartialEq)]` gives us printing, cheap
//! copies and `==` for free. Points are two floats, so `Copy` is the right
//! call: passing one around is as cheap as passing a pointer to it.

use std::ops::Sub;

use crate::error::CollisionError;
use crate::intersect::{is_exact_zero, segments_intersect};

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A direction/offset between two points.
///
/// Kept separate from [`Point`] so the type system stops us from adding
/// two positions together by accident.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// A finite straight line between two points.
///
/// Segments handed to the intersection tests must have distinct endpoints;
/// see [`Segment::is_degenerate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when neither coordinate is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// ## Rust Lesson #4: Operator Overloading
//
// Implementing `std::ops::Sub` is what makes `a - b` compile for our type.
// The `Output` associated type says what the subtraction produces: here a
// Vector, not another Point.

impl Sub for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Vector {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn square_norm(&self) -> f64 {
        self.dot(*self)
    }

    /// The vector rotated a quarter turn counter-clockwise.
    #[inline]
    pub fn perp(&self) -> Vector {
        Vector::new(-self.y, self.x)
    }

    /// Exact zero test (no tolerance, see [`is_exact_zero`]).
    #[inline]
    pub fn is_zero(&self) -> bool {
        is_exact_zero(self.x) && is_exact_zero(self.y)
    }
}

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.end - self.start
    }

    /// True when both endpoints coincide exactly.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction().is_zero()
    }

    /// Whether this segment crosses or touches `other`.
    ///
    /// Parallel segments never intersect, even when they overlap.
    #[inline]
    pub fn intersects(&self, other: &Segment) -> Result<bool, CollisionError> {
        segments_intersect(self.start, self.end, other.start, other.end)
    }
}
