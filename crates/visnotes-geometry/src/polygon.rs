//! Containment predicates and vertex generators.
//!
//! All tests are inclusive where the math allows it. The polygon test is the
//! classic even-odd ray crossing, so points exactly on an edge may land on
//! either side.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::Point;

/// Even-odd ray-crossing test. Fewer than three vertices contain nothing.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        let crosses = (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Barycentric containment test; inside iff all three weights lie in [0, 1].
/// Degenerate (zero-area) triangles contain nothing.
pub fn point_in_triangle(point: Point, a: Point, b: Point, c: Point) -> bool {
    let denominator = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    let wa = ((b.y - c.y) * (point.x - c.x) + (c.x - b.x) * (point.y - c.y)) / denominator;
    let wb = ((c.y - a.y) * (point.x - c.x) + (a.x - c.x) * (point.y - c.y)) / denominator;
    let wc = 1.0 - wa - wb;

    let unit = 0.0..=1.0;
    unit.contains(&wa) && unit.contains(&wb) && unit.contains(&wc)
}

/// Normalized ellipse equation `(dx/rx)^2 + (dy/ry)^2 <= 1`
pub fn point_in_ellipse(point: Point, center: Point, rx: f64, ry: f64) -> bool {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    (dx * dx) / (rx * rx) + (dy * dy) / (ry * ry) <= 1.0
}

/// True when `point` lies within `tolerance` of any sample
pub fn near_any(point: Point, samples: &[Point], tolerance: f64) -> bool {
    samples.iter().any(|s| point.distance_to(*s) <= tolerance)
}

/// Vertices of a regular N-gon of circumradius `radius`, first vertex straight up
pub fn regular_polygon_vertices(center: Point, radius: f64, sides: usize) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let angle = TAU / sides as f64 * i as f64 - FRAC_PI_2;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

/// Star outline alternating outer and inner radius, first (outer) tip straight up
pub fn star_vertices(center: Point, outer_radius: f64, inner_radius: f64, points: u32) -> Vec<Point> {
    (0..points * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            let angle = PI / points as f64 * i as f64 - FRAC_PI_2;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}
