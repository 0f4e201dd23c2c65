//! Positional importance weighting for candidate scoring.
//!
//! The importance of a point relative to a candidate crop combines a radial
//! center bump, an optional border-band falloff, and an optional
//! rule-of-thirds bump. Points outside the crop get a flat (typically
//! negative) importance so features the crop excludes count against it.

use crate::crop::Crop;

use std::f32::consts::SQRT_2;

/// Rule-of-thirds bump: 1.0 when `v` sits exactly on the 1/3 mark, falling
/// off quadratically to 0 within 1/8 on either side.
///
/// `v` is a folded crop coordinate (`|0.5 - n| * 2` for a normalized
/// position `n`), so a single bump at 1/3 covers both thirds lines.
#[inline]
pub fn thirds(v: f32) -> f32 {
    let d = v - 1.0 / 3.0;
    (1.0 - 64.0 * d * d).max(0.0)
}

/// Importance of image point `(x, y)` with respect to `crop`.
///
/// Outside the crop the result is exactly `outside_importance`. Inside, the
/// position is normalized into the crop and folded into center distances
/// `px, py` in [0, 1] (0 = crop center, 1 = crop edge). The base term
/// `(sqrt(2) - sqrt(px^2 + py^2)) / sqrt(2)` peaks at 1 in the center and
/// reaches 0 at the far corners.
///
/// When `edge_weight > 0`, a border-band term is added: it holds at
/// `edge_weight` across the interior and falls off (eventually below zero)
/// for points within `edge_radius` of the crop border, penalizing content
/// that sits against the edge. When `thirds_weight > 0`, the averaged
/// rule-of-thirds bump of `px` and `py` is added with that weight. Terms
/// whose weight is not positive are skipped entirely.
pub fn importance(
    crop: &Crop,
    x: u32,
    y: u32,
    outside_importance: f32,
    edge_radius: f32,
    edge_weight: f32,
    thirds_weight: f32,
) -> f32 {
    if !crop.contains(x, y) {
        return outside_importance;
    }

    let nx = (x - crop.x()) as f32 / crop.width() as f32;
    let ny = (y - crop.y()) as f32 / crop.height() as f32;
    let px = (0.5 - nx).abs() * 2.0;
    let py = (0.5 - ny).abs() * 2.0;

    let mut total = (SQRT_2 - (px * px + py * py).sqrt()) / SQRT_2;

    if edge_weight > 0.0 {
        let dx = (px - 1.0 + edge_radius).max(0.0);
        let dy = (py - 1.0 + edge_radius).max(0.0);
        let edge_term = (edge_radius * edge_radius - (dx * dx + dy * dy).sqrt())
            / (edge_radius * edge_radius);
        total += edge_term * edge_weight;
    }

    if thirds_weight > 0.0 {
        total += (thirds(px) + thirds(py)) * 0.5 * thirds_weight;
    }

    total
}
