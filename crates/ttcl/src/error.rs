//! Errors raised by shape construction and collision queries.
//!
//! ## Rust Lesson #6: Errors Are Values
//!
//! A C++ library would `throw` here. Rust returns `Result<T, E>` instead,
//! so every caller can see from the signature that a query may fail:
//! - `Ok(true)` / `Ok(false)` = the query was answered
//! - `Err(CollisionError::...)` = the query itself was invalid
//!
//! None of these are transient. They mean the caller built something wrong
//! or asked something that has no answer, so there is nothing to retry.

use std::fmt;

/// Everything that can go wrong while building shapes or testing them.
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// A shape was built from invalid data (too few points, bad radius, NaN coordinates).
    Construction(String),
    /// A segment test got a zero-length segment.
    DegenerateInput,
    /// Dispatch met a shape that is neither a polygon nor a circle.
    UnsupportedShape { name: String },
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionError::Construction(msg) => write!(f, "invalid shape: {}", msg),
            CollisionError::DegenerateInput => {
                write!(f, "segments need two different points")
            }
            CollisionError::UnsupportedShape { name } => {
                write!(f, "collision with {} is not implemented", name)
            }
        }
    }
}

impl std::error::Error for CollisionError {}
