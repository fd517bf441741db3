//! Point-in-polygon testing.
//!
//! Every walk step runs one of these, so it stays allocation-free.

use crate::geometry::Point;

// ============================================================================
// POINT IN POLYGON (Ray Casting Algorithm)
// ============================================================================
//
// ## Rust Lesson #8: References & Slices
//
// `&[Point]` is a "slice" - a borrowed view into a contiguous sequence.
// It works with Vec<Point>, arrays, or any contiguous memory.

/// Test if a point is inside a ring using ray casting.
///
/// Casts a ray to the right and counts edge crossings.
/// Odd crossings = inside, even = outside.
///
/// Rings with fewer than 3 points never contain anything. Results on
/// self-intersecting rings follow the even-odd rule and nothing more.
#[inline]
pub fn point_in_polygon(px: f64, py: f64, ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (ring[i].x, ring[i].y);
        let (xj, yj) = (ring[j].x, ring[j].y);

        // `&&` short-circuits: the division only runs when exactly one
        // endpoint is above `py`, so `yj - yi` is never zero there.
        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// [`point_in_polygon`] taking a `Point`.
#[inline]
pub fn contains(point: Point, ring: &[Point]) -> bool {
    point_in_polygon(point.x, point.y, ring)
}

// ============================================================================
// TESTS
// ============================================================================
