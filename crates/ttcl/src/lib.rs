//! # ttcl
//!
//! Tiny 2D collision tests between polylines ("polygons") and circles.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Every module has to be declared explicitly here before it exists.
//!
//! ```
//! use ttcl::{Circle, Collides, Point, Polygon};
//!
//! let circle = Circle::new(Point::new(0.0, 0.0), 1.0)?;
//! let line = Polygon::open(vec![Point::new(-2.0, 0.5), Point::new(2.0, 0.5)])?;
//! assert!(line.collides(&circle)?);
//! # Ok::<(), ttcl::CollisionError>(())
//! ```

pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod intersect;
pub mod scene;
pub mod shape;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use dispatch::{Geometry, Shape, ShapeRef, dispatch};
pub use error::CollisionError;
pub use geometry::{Point, Segment, Vector};
pub use intersect::{circles_intersect, is_exact_zero, segment_intersects_circle, segments_intersect};
pub use scene::{any_collision, colliding_pairs};
pub use shape::{Circle, Collides, Polygon};
pub use svg::{NamedShape, SvgError, extract_shapes_from_svg};
