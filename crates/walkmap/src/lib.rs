//! # walkmap
//!
//! Random-walk line drawings over polygon maps.
//!
//! Each polygon part gets a jagged walk that starts at its centroid, takes
//! axis-aligned steps, and turns back toward the centroid whenever it
//! leaves the polygon. The walk's segments are then drawn onto a
//! [`Surface`] after a fixed delay.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod config;
pub mod containment;
pub mod geometry;
pub mod palette;
pub mod projection;
pub mod schedule;
pub mod surface;
pub mod svg;
pub mod walk;

// Re-export common types at crate root for convenience.
pub use config::{Preset, UnknownPreset, WalkConfig};
pub use containment::{contains, point_in_polygon};
pub use geometry::{Line, Point, Polygon};
pub use palette::{PALETTE, random_color};
pub use projection::{Affine, Identity, Projection};
pub use schedule::{DEFAULT_DELAY, DrawTask, RenderSummary, Schedule, Scheduler, render};
pub use surface::{Surface, SvgSurface};
pub use svg::{SvgError, extract_features_from_svg, extract_viewbox};
pub use walk::{Feature, Part, Segment, Walk, WalkState, generate, walk_part};
