//! Mapping between native polygon coordinates and display coordinates.
//!
//! Walks happen in display space, but containment is checked against the
//! native ring, so every projection must be invertible.

use crate::geometry::Point;

/// A reversible coordinate mapping.
///
/// ## Rust Lesson #24: Traits
///
/// A trait is like a TypeScript `interface`: any type that implements
/// `project` and `invert` can be handed to the walk generator. Generic
/// functions (`fn f<P: Projection>(p: &P)`) get a specialised copy per
/// type, so there's no dynamic dispatch cost.
pub trait Projection {
    /// Native coordinates to display coordinates.
    fn project(&self, point: Point) -> Point;

    /// Display coordinates back to native coordinates.
    fn invert(&self, point: Point) -> Point;

    /// Project every point of a ring.
    fn project_ring(&self, ring: &[Point]) -> Vec<Point> {
        ring.iter().map(|&p| self.project(p)).collect()
    }
}

/// Native coordinates are already display coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Projection for Identity {
    #[inline]
    fn project(&self, point: Point) -> Point {
        point
    }

    #[inline]
    fn invert(&self, point: Point) -> Point {
        point
    }
}

/// Uniform scale followed by a translation: `p * scale + translate`.
#[derive(Debug, Clone, Copy)]
pub struct Affine {
    pub scale: f64,
    pub translate: Point,
}

impl Affine {
    pub fn new(scale: f64, translate: Point) -> Self {
        Self { scale, translate }
    }

    /// Scale about the origin with no translation.
    pub fn zoom(scale: f64) -> Self {
        Self::new(scale, Point::new(0.0, 0.0))
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::zoom(1.0)
    }
}

impl Projection for Affine {
    #[inline]
    fn project(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale + self.translate.x,
            point.y * self.scale + self.translate.y,
        )
    }

    #[inline]
    fn invert(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.translate.x) / self.scale,
            (point.y - self.translate.y) / self.scale,
        )
    }
}

impl<P: Projection + ?Sized> Projection for &P {
    fn project(&self, point: Point) -> Point {
        (**self).project(point)
    }

    fn invert(&self, point: Point) -> Point {
        (**self).invert(point)
    }
}
