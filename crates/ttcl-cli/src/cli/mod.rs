//! CLI command implementations.
//!
//! - `check` - Find every colliding pair in an SVG
//! - `pair` - Test two shapes selected by id

pub mod check;
pub mod common;
pub mod pair;

pub use check::cmd_check;
pub use common::EXIT_ERROR;
pub use pair::cmd_pair;
