//! CLI command implementations.
//!
//! - `walk` - Generate random-walk drawings for SVG polygons
//! - `presets` - List built-in region presets

pub mod common;
pub mod config;
pub mod presets;
pub mod walk;

pub use presets::cmd_presets;
pub use walk::{WalkArgs, cmd_walk};
