//! Primitive intersection tests.
//!
//! This is the HOT PATH: polygon-vs-polygon queries call
//! [`segments_intersect`] once per edge pair.
//!
//! All comparisons here are exact. Parallel segments are reported as not
//! intersecting and tangent circles as not colliding; callers rely on both.

use crate::error::CollisionError;
use crate::geometry::Point;
use crate::shape::Circle;

// ============================================================================
// ZERO PREDICATE
// ============================================================================

/// The one place that decides when a float counts as zero.
///
/// Used for degenerate segments and parallel segments. It is an exact
/// comparison; a tolerant version would replace this body and nothing else.
#[inline]
pub fn is_exact_zero(value: f64) -> bool {
    value == 0.0
}

// ============================================================================
// SEGMENT-SEGMENT
// ============================================================================

/// Test whether segment `a_start..a_end` crosses or touches `b_start..b_end`.
///
/// Both segments are written parametrically,
/// `P(α) = a_start + α·a_dir` and `Q(β) = b_start + β·b_dir`, and the 2x2
/// system `P(α) = Q(β)` is solved with Cramer's rule. The segments
/// intersect when both parameters land in `[0, 1]` (endpoints included).
///
/// A zero determinant means the segments are parallel or collinear; that is
/// reported as `false`, even for overlapping collinear segments.
///
/// # Errors
/// [`CollisionError::DegenerateInput`] if either segment has zero length.
#[inline]
pub fn segments_intersect(
    a_start: Point,
    a_end: Point,
    b_start: Point,
    b_end: Point,
) -> Result<bool, CollisionError> {
    let a_dir = a_end - a_start;
    let b_dir = b_end - b_start;

    if a_dir.is_zero() || b_dir.is_zero() {
        return Err(CollisionError::DegenerateInput);
    }

    let det = a_dir.y * b_dir.x - a_dir.x * b_dir.y;
    if is_exact_zero(det) {
        return Ok(false);
    }

    let offset = b_start - a_start;

    let alpha = b_dir.perp().dot(offset) / det;
    if !(0.0..=1.0).contains(&alpha) {
        return Ok(false);
    }

    let beta = a_dir.perp().dot(offset) / det;
    Ok((0.0..=1.0).contains(&beta))
}

// ============================================================================
// SEGMENT-CIRCLE
// ============================================================================

/// Test whether segment `start..end` enters the disk of `circle`.
///
/// Solves `|start + t·d - center|² = r²` for `t`. The segment hits the
/// circle when either root lies in `[0, 1]`. That covers chords, tangents
/// and segments with exactly one endpoint inside the disk. A segment that
/// lies entirely inside the disk has both roots outside `[0, 1]` and is
/// reported as `false`.
///
/// # Errors
/// [`CollisionError::DegenerateInput`] if the segment has zero length.
#[inline]
pub fn segment_intersects_circle(
    circle: &Circle,
    start: Point,
    end: Point,
) -> Result<bool, CollisionError> {
    let d = end - start;

    // A tiny but nonzero `d` can still square to 0.
    let a = d.dot(d);
    if is_exact_zero(a) {
        return Err(CollisionError::DegenerateInput);
    }

    let from_center = start - circle.center();
    let b = 2.0 * d.dot(from_center);
    let c = from_center.dot(from_center) - circle.radius_squared();

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Ok(false);
    }
    let root = discriminant.sqrt();

    let t1 = (-b - root) / (2.0 * a);
    let t2 = (-b + root) / (2.0 * a);

    Ok((0.0..=1.0).contains(&t1) || (0.0..=1.0).contains(&t2))
}

// ============================================================================
// CIRCLE-CIRCLE
// ============================================================================

/// Test whether two disks overlap.
///
/// Compares the squared center distance against
/// `r1² + r2² + 2·sqrt(r1²·r2²)`, i.e. `(r1 + r2)²`, with a strict `<`.
/// Circles that exactly touch do not collide.
#[inline]
pub fn circles_intersect(c1: &Circle, c2: &Circle) -> bool {
    let (r1_sq, r2_sq) = (c1.radius_squared(), c2.radius_squared());
    (c1.center() - c2.center()).square_norm() < r1_sq + r2_sq + 2.0 * (r1_sq * r2_sq).sqrt()
}

// ============================================================================
// TESTS
// ============================================================================
