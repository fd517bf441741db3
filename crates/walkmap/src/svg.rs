//! SVG parsing - extract map features from SVG files.
//!
//! Uses usvg for complete SVG resolution (CSS, shapes to paths, etc.)
//! then walks the tree. Each path element becomes one [`Feature`]; each of
//! its subpaths becomes one polygon part.
//!
//! usvg keeps path data in the path's local coordinates. Group and element
//! transforms are applied here through `abs_transform()`, so every ring
//! comes out in root (viewBox) coordinates.
//!
//! ## Curve Flattening
//!
//! SVG paths contain Bézier curves (cubic and quadratic). These must be
//! "flattened" into line segments before containment tests can run on
//! them. We use lyon_geom for accurate curve approximation.

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};
use tracing::{Level, event};

use crate::geometry::{Point, Polygon};
use crate::walk::Feature;

/// Error type for SVG parsing.
#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    Parse(String),
    #[error("No polygons found in SVG")]
    NoPolygons,
}

/// Extract every feature from an SVG document.
pub fn extract_features_from_svg(svg_content: &str) -> Result<Vec<Feature>, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| SvgError::Parse(e.to_string()))?;

    let mut features = Vec::new();
    extract_from_group(tree.root(), &mut features);

    event!(Level::DEBUG, "Extracted [{}] features from SVG", features.len());

    if features.is_empty() {
        Err(SvgError::NoPolygons)
    } else {
        Ok(features)
    }
}

/// Find the viewBox attribute of the root element, if any.
pub fn extract_viewbox(svg: &str) -> Option<String> {
    for attr in ["viewBox=\"", "viewbox=\""] {
        if let Some(start) = svg.find(attr) {
            let rest = &svg[start + attr.len()..];
            if let Some(end) = rest.find('"') {
                return Some(rest[..end].to_string());
            }
        }
    }
    None
}

fn extract_from_group(group: &usvg::Group, features: &mut Vec<Feature>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => extract_from_group(group, features),
            usvg::Node::Path(path) => {
                if let Some(feature) = path_to_feature(path) {
                    features.push(feature);
                }
            }
            // Ignore text, images, etc.
            _ => {}
        }
    }
}

/// Tolerance for curve flattening.
const CURVE_TOLERANCE: f32 = 0.1;

/// Convert a usvg path to a feature with one part per subpath.
fn path_to_feature(path: &usvg::Path) -> Option<Feature> {
    let id = if path.id().is_empty() {
        None
    } else {
        Some(path.id().to_string())
    };

    // None only for transforms that produce non-finite points
    let data = path.data().clone().transform(path.abs_transform())?;

    let mut parts = Vec::new();
    let mut points: Vec<Point> = Vec::new();
    let mut last_point: Option<(f32, f32)> = None;

    for cmd in data.segments() {
        match cmd {
            usvg::tiny_skia_path::PathSegment::MoveTo(p) => {
                finish_ring(&mut points, &id, &mut parts);
                points.push(Point::new(p.x as f64, p.y as f64));
                last_point = Some((p.x, p.y));
            }
            usvg::tiny_skia_path::PathSegment::LineTo(p) => {
                points.push(Point::new(p.x as f64, p.y as f64));
                last_point = Some((p.x, p.y));
            }
            usvg::tiny_skia_path::PathSegment::QuadTo(ctrl, p) => {
                if let Some((lx, ly)) = last_point {
                    let curve = QuadraticBezierSegment {
                        from: point(lx, ly),
                        ctrl: point(ctrl.x, ctrl.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                        points.push(Point::new(segment.to.x as f64, segment.to.y as f64));
                    });
                } else {
                    points.push(Point::new(p.x as f64, p.y as f64));
                }
                last_point = Some((p.x, p.y));
            }
            usvg::tiny_skia_path::PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                if let Some((lx, ly)) = last_point {
                    let curve = CubicBezierSegment {
                        from: point(lx, ly),
                        ctrl1: point(ctrl1.x, ctrl1.y),
                        ctrl2: point(ctrl2.x, ctrl2.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                        points.push(Point::new(segment.to.x as f64, segment.to.y as f64));
                    });
                } else {
                    points.push(Point::new(p.x as f64, p.y as f64));
                }
                last_point = Some((p.x, p.y));
            }
            usvg::tiny_skia_path::PathSegment::Close => {}
        }
    }
    finish_ring(&mut points, &id, &mut parts);

    if parts.is_empty() {
        None
    } else {
        Some(Feature::new(id, parts))
    }
}

/// Close off the current subpath, keeping it if it still has an area.
fn finish_ring(points: &mut Vec<Point>, id: &Option<String>, parts: &mut Vec<Polygon>) {
    // Curve flattening can repeat points
    points.dedup_by(|a, b| (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);

    if points.len() >= 3 {
        parts.push(Polygon::with_id(std::mem::take(points), id.clone()));
    } else {
        points.clear();
    }
}

// ============================================================================
// TESTS
// ============================================================================
