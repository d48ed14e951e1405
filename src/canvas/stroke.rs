//! Distance and coverage functions for anti-aliased strokes.

/// Anti-aliased edge function.
///
/// Creates a smooth transition from 1 to 0 as distance increases past the edge.
///
/// # Parameters
/// - `dist`: Distance from the edge (0 = on edge)
/// - `half_thickness`: Half the total thickness (distance from center to edge)
/// - `aa_width`: Width of the anti-aliasing transition (typically 1.0)
#[inline]
pub fn aa_edge(dist: f32, half_thickness: f32, aa_width: f32) -> f32 {
    if dist < half_thickness {
        1.0
    } else if dist < half_thickness + aa_width {
        1.0 - (dist - half_thickness) / aa_width
    } else {
        0.0
    }
}

/// Euclidean distance from a point to a line segment.
///
/// Zero-length segments degrade to point distance, which gives a round dot.
pub fn dist_to_segment(px: f32, py: f32, x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    let vx = x1 - x0;
    let vy = y1 - y0;
    let len2 = vx * vx + vy * vy;
    let t = if len2 > 0.0 {
        (((px - x0) * vx + (py - y0) * vy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let cx = x0 + t * vx;
    let cy = y0 + t * vy;
    ((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt()
}

/// Pixel coverage of a round-capped stroke at `dist` from its centre line.
///
/// Strokes thinner than a pixel keep a one-pixel footprint and lose
/// intensity instead, so hairlines stay sharp.
#[inline]
pub fn stroke_coverage(dist: f32, width: f32) -> f32 {
    let (footprint, intensity) = if width < 1.0 {
        (1.0, width.max(0.0))
    } else {
        (width, 1.0)
    };
    aa_edge(dist, footprint / 2.0 - 0.5, 1.0) * intensity
}
