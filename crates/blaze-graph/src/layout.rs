//! Circular display layout.
//!
//! Region `i` of `N` sits at angle `2 * pi * i / N` on a circle of unit
//! radius centred on the origin, so the base (region 0) is always at
//! `(1, 0)`. Renderers scale and translate these coordinates to their
//! own canvas.

use std::f64::consts::TAU;

use blaze_types::Position;

/// Radius of the layout circle.
pub const LAYOUT_RADIUS: f64 = 1.0;

/// Positions for `count` regions evenly spaced on a circle.
pub fn circular(count: usize) -> Vec<Position> {
    let Ok(count) = u32::try_from(count) else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }

    let step = TAU / f64::from(count);
    (0..count)
        .map(|i| {
            let angle = step * f64::from(i);
            Position::new(LAYOUT_RADIUS * angle.cos(), LAYOUT_RADIUS * angle.sin())
        })
        .collect()
}
