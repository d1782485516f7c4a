//! Collision queries over a whole set of shapes.
//!
//! Brute force: every pair is tested, O(n²) pair tests. Scenes loaded from
//! a single drawing are small enough that this never shows up in profiles.

use crate::dispatch::Shape;
use crate::error::CollisionError;
use crate::shape::Collides;

/// Find every pair of colliding shapes.
///
/// Returns index pairs `(i, j)` with `i < j`, sorted lexicographically.
/// The first error aborts the whole query.
pub fn colliding_pairs(shapes: &[Shape]) -> Result<Vec<(usize, usize)>, CollisionError> {
    let mut pairs = Vec::new();

    for (i, a) in shapes.iter().enumerate() {
        for (j, b) in shapes.iter().enumerate().skip(i + 1) {
            if a.collides(b)? {
                pairs.push((i, j));
            }
        }
    }

    Ok(pairs)
}

/// Whether `probe` collides with anything in `shapes`.
///
/// Stops at the first hit.
pub fn any_collision(probe: &Shape, shapes: &[Shape]) -> Result<bool, CollisionError> {
    for shape in shapes {
        if probe.collides(shape)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Number of pair tests [`colliding_pairs`] runs for `n` shapes.
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
