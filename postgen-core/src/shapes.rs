//! Closed-form shape geometry and output number formatting.

use std::f64::consts::TAU;

/// Output precision in decimal places.
const PRECISION: f64 = 1e4;

/// Format a number for the generated document.
///
/// Rounded to four decimal places with trailing zeros trimmed, so integral
/// results print as plain integers and near-zero trigonometric residue
/// (e.g. `cos(π/2)`) prints as `0`.
#[must_use]
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * PRECISION).round() / PRECISION;
    if rounded == 0.0 {
        // Catches -0.0 as well.
        return "0".to_owned();
    }
    // The cast saturates at the i64 limits, so only take it when exact.
    if rounded.fract() == 0.0 && rounded.abs() < i64::MAX as f64 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

/// Vertices of a regular n-gon of radius `r` centered at `(cx, cy)`.
///
/// Vertex `i` sits at angle `2π·i/n`, counter-clockwise from angle 0.
#[must_use]
pub fn polygon_vertices(cx: f64, cy: f64, r: f64, n: u32) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let theta = TAU * f64::from(i) / f64::from(n);
            (cx + r * theta.cos(), cy + r * theta.sin())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
