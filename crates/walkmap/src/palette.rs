//! Stroke colours for walks.

use rand::Rng;

/// The fixed colour set a feature's walks are drawn from.
pub const PALETTE: [&str; 20] = [
    "#3366cc", "#dc3912", "#ff9900", "#109618", "#990099",
    "#0099c6", "#dd4477", "#66aa00", "#b82e2e", "#316395",
    "#994499", "#22aa99", "#aaaa11", "#6633cc", "#e67300",
    "#8b0707", "#651067", "#329262", "#5574a6", "#3b3eac",
];

/// Pick one palette colour uniformly at random.
#[inline]
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PALETTE[rng.random_range(0..PALETTE.len())]
}
