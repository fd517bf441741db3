//! Random-walk line generation.
//!
//! Each polygon part gets a walk that starts at its centroid and takes
//! axis-aligned steps. While the walk is inside the polygon the direction
//! is free; after a step lands outside, the next direction is biased back
//! toward the centroid. Steps outside are still emitted (with
//! `inside == false`) because they decide the next turn, but renderers
//! skip them.
//!
//! # Example
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use walkmap::{generate, Feature, Identity, Point, Polygon, WalkConfig};
//!
//! let square = Polygon::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ]);
//! let features = vec![Feature::from(square)];
//! let mut rng = StdRng::seed_from_u64(1);
//! let segments = generate(&features, &Identity, &WalkConfig::default(), &mut rng);
//! assert!(segments[0].seed);
//! ```

use std::f64::consts::FRAC_PI_2;

use rand::Rng;
use serde::Serialize;
use tracing::{Level, event, span};

use crate::config::WalkConfig;
use crate::containment::contains;
use crate::geometry::{Line, Point, Polygon};
use crate::palette::random_color;
use crate::projection::Projection;

/// Fewest steps any walk takes, however small the polygon.
pub const MIN_STEPS: usize = 5;

/// One drawable piece of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Whether the end point landed inside the polygon
    pub inside: bool,
    /// Zero-length marker at the walk origin
    pub seed: bool,
    /// Shared by every segment of one walk
    pub stroke: &'static str,
}

impl Segment {
    /// The zero-length first segment of a walk.
    pub fn seed_at(point: Point, stroke: &'static str) -> Self {
        Self {
            x1: point.x,
            y1: point.y,
            x2: point.x,
            y2: point.y,
            inside: true,
            seed: true,
            stroke,
        }
    }

    /// A regular walk step.
    pub fn step(start: Point, end: Point, inside: bool, stroke: &'static str) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            inside,
            seed: false,
            stroke,
        }
    }

    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    #[inline]
    pub fn line(&self) -> Line {
        Line::new(self.x1, self.y1, self.x2, self.y2)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.line().length()
    }

    /// Seeds and steps that stayed inside get drawn; everything else only
    /// steered the walk.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.inside || self.seed
    }
}

/// A map entity with one or more polygon parts.
///
/// All parts of a feature share one stroke colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub parts: Vec<Polygon>,
}

impl Feature {
    pub fn new(id: Option<String>, parts: Vec<Polygon>) -> Self {
        Self { id, parts }
    }
}

impl From<Polygon> for Feature {
    fn from(polygon: Polygon) -> Self {
        Self {
            id: polygon.id.clone(),
            parts: vec![polygon],
        }
    }
}

/// A polygon ready to walk: its native ring plus centroid and area in
/// display space.
#[derive(Debug, Clone, Copy)]
pub struct Part<'a> {
    /// Outer ring in native (unprojected) coordinates
    pub ring: &'a [Point],
    /// Walk origin and steering target, in display coordinates
    pub centroid: Point,
    /// Area in display units
    pub area: f64,
}

impl<'a> Part<'a> {
    /// Use an externally computed centroid and area.
    pub fn new(ring: &'a [Point], centroid: Point, area: f64) -> Self {
        Self { ring, centroid, area }
    }

    /// Measure a polygon's centroid and area after projecting it.
    pub fn measure<P: Projection + ?Sized>(polygon: &'a Polygon, projection: &P) -> Self {
        let projected = Polygon::new(projection.project_ring(&polygon.outer));
        Self {
            ring: &polygon.outer,
            centroid: projected.centroid(),
            area: projected.area(),
        }
    }

    /// `max(5, round(area * density))`.
    pub fn step_count(&self, density: f64) -> usize {
        let raw = (self.area * density).round();
        if raw.is_finite() && raw > MIN_STEPS as f64 {
            raw as usize
        } else {
            MIN_STEPS
        }
    }

    /// `min(sqrt(area), scale)`: small parts take small steps.
    ///
    /// A NaN root (negative or NaN area) yields `scale`.
    pub fn step_length(&self, scale: f64) -> f64 {
        self.area.sqrt().min(scale)
    }
}

/// Transient state of one walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkState {
    pub current: Point,
    pub inside: bool,
    pub stroke: &'static str,
    pub steps_remaining: usize,
}

/// Lazily yields one part's segments: the seed, then every step.
///
/// ## Rust Lesson #25: Iterators Own Their State
///
/// `Walk` implements `Iterator`, so callers can `collect()`, `extend()` or
/// `take(n)` it. The walk state lives inside the struct between calls to
/// `next()`, like a JS generator's local variables.
pub struct Walk<'a, P: ?Sized, R: ?Sized> {
    part: Part<'a>,
    projection: &'a P,
    rng: &'a mut R,
    stroke: &'static str,
    step_length: f64,
    steps: usize,
    state: Option<WalkState>,
    skipped: bool,
}

impl<'a, P, R> Walk<'a, P, R>
where
    P: Projection + ?Sized,
    R: Rng + ?Sized,
{
    /// State after the most recent segment (None before the seed).
    pub fn state(&self) -> Option<&WalkState> {
        self.state.as_ref()
    }

    fn next_step(&mut self, state: WalkState) -> (Segment, WalkState) {
        let start = state.current;
        let theta = if state.inside {
            free_angle(&mut *self.rng)
        } else {
            steer_angle(start, self.part.centroid, &mut *self.rng)
        };

        let end = Point::new(
            start.x + theta.cos() * self.step_length,
            start.y + theta.sin() * self.step_length,
        );
        let inside = contains(self.projection.invert(end), self.part.ring);

        let next = WalkState {
            current: end,
            inside,
            stroke: state.stroke,
            steps_remaining: state.steps_remaining - 1,
        };
        (Segment::step(start, end, inside, state.stroke), next)
    }
}

impl<P, R> Iterator for Walk<'_, P, R>
where
    P: Projection + ?Sized,
    R: Rng + ?Sized,
{
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.skipped {
            return None;
        }

        match self.state {
            None => {
                let state = WalkState {
                    current: self.part.centroid,
                    inside: true,
                    stroke: self.stroke,
                    steps_remaining: self.steps,
                };
                self.state = Some(state);
                Some(Segment::seed_at(state.current, state.stroke))
            }
            Some(state) if state.steps_remaining == 0 => None,
            Some(state) => {
                let (segment, next) = self.next_step(state);
                self.state = Some(next);
                Some(segment)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.skipped {
            0
        } else {
            match self.state {
                None => self.steps.saturating_add(1),
                Some(state) => state.steps_remaining,
            }
        };
        (left, Some(left))
    }
}

/// Start a walk over one part.
///
/// Parts whose area is below `config.cutoff_area` yield nothing, not even
/// a seed.
pub fn walk_part<'a, P, R>(
    part: Part<'a>,
    projection: &'a P,
    stroke: &'static str,
    config: &WalkConfig,
    rng: &'a mut R,
) -> Walk<'a, P, R>
where
    P: Projection + ?Sized,
    R: Rng + ?Sized,
{
    let skipped = part.area < config.cutoff_area;
    if skipped {
        event!(
            Level::DEBUG,
            "Skipping part with area [{:.2}] below cutoff [{:.2}]",
            part.area,
            config.cutoff_area
        );
    }

    let steps = part.step_count(config.density);
    let step_length = part.step_length(config.scale);

    if !skipped {
        event!(
            Level::TRACE,
            "Walking [{}] steps of length [{:.3}] from ({:.2}, {:.2})",
            steps,
            step_length,
            part.centroid.x,
            part.centroid.y
        );
    }

    Walk {
        part,
        projection,
        rng,
        stroke,
        step_length,
        steps,
        state: None,
        skipped,
    }
}

/// Generate walks for every part of every feature, in order.
///
/// Each feature draws one colour from the palette; its parts share it.
pub fn generate<P, R>(
    features: &[Feature],
    projection: &P,
    config: &WalkConfig,
    rng: &mut R,
) -> Vec<Segment>
where
    P: Projection + ?Sized,
    R: Rng + ?Sized,
{
    let span = span!(Level::DEBUG, "generate", features = features.len());
    let _guard = span.enter();

    let mut segments = Vec::new();

    for feature in features {
        let stroke = random_color(rng);
        for polygon in &feature.parts {
            let part = Part::measure(polygon, projection);
            segments.extend(walk_part(part, projection, stroke, config, rng));
        }
    }

    event!(
        Level::DEBUG,
        "Generated [{}] segments, [{}] drawable",
        segments.len(),
        segments.iter().filter(|s| s.is_drawable()).count()
    );

    segments
}

// ============================================================================
// DIRECTION CHOICE
// ============================================================================

/// One of the four axis directions: 90°, 180°, 270° or 360°.
fn free_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random_range(1..=4) as f64 * FRAC_PI_2
}

/// Turn back toward `target` after leaving the polygon.
///
/// Picks a whole-degree offset within ±90° of the bearing to `target`,
/// then floors it to a multiple of 90°. Flooring can land up to 180° off
/// the bearing; that is the expected behaviour.
fn steer_angle<R: Rng + ?Sized>(from: Point, target: Point, rng: &mut R) -> f64 {
    let bearing = (target.y - from.y).atan2(target.x - from.x).to_degrees();
    let picked = bearing - 90.0 + rng.random_range(0..=180) as f64;
    let snapped = (picked / 90.0).floor() * 90.0;
    snapped.to_radians()
}

// ============================================================================
// TESTS
// ============================================================================
