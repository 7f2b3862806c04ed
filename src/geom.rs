//! Vector primitives: hinge plotting, interpolation, intersection, insets.
//!
//! Angles are radians, counter-clockwise positive in math orientation. The
//! "left" side of a directed segment is the side reached by rotating its
//! direction by +π/2; projection distances are signed against that side.

use std::f64::consts::PI;

use glam::DVec2;

use crate::errors::GeometryError;
use crate::types::{EPSILON, Point};

/// Reach used for "cast a ray" helpers; large enough to leave any net.
pub const VERY_LARGE_NUMBER: f64 = 1e6;

/// Rotate `reference - pivot` about `pivot` by `angle`, rescale it to
/// `distance` and place the result relative to `pivot`.
///
/// Coincident `pivot` and `reference` have no direction; the pivot itself
/// is returned.
pub fn hinged_plot(pivot: Point, reference: Point, angle: f64, distance: f64) -> Point {
    let direction = (reference - pivot).normalize_or_zero();
    pivot + DVec2::from_angle(angle).rotate(direction) * distance
}

/// Like [`hinged_plot`], but `projection_distance` is the signed distance of
/// the result from the pivot–reference line (positive on the left side)
/// rather than the length of the hinge ray.
pub fn hinged_plot_by_projection_distance(
    pivot: Point,
    reference: Point,
    angle: f64,
    projection_distance: f64,
) -> Result<Point, GeometryError> {
    let sine = angle.sin();
    if sine.abs() < EPSILON {
        return Err(GeometryError::DegenerateProjection { angle });
    }
    Ok(hinged_plot(
        pivot,
        reference,
        angle,
        projection_distance / sine,
    ))
}

/// Hinge rotation combined with interpolation: `ratio` 0 is the pivot, 1 is
/// the reference rotated by `angle`.
pub fn hinged_plot_lerp(pivot: Point, reference: Point, angle: f64, ratio: f64) -> Point {
    pivot + DVec2::from_angle(angle).rotate(reference - pivot) * ratio
}

/// Two hinge plots mirrored about the perpendicular bisector of
/// `start`–`end`; both land `projection_distance` to the left of the segment.
///
/// The first point hinges on `start`, the second on `end`.
pub fn symmetric_hinge_plot_by_projection_distance(
    start: Point,
    end: Point,
    angle: f64,
    projection_distance: f64,
) -> Result<[Point; 2], GeometryError> {
    Ok([
        hinged_plot_by_projection_distance(start, end, angle, projection_distance)?,
        // seen from `end` the left side is flipped
        hinged_plot_by_projection_distance(end, start, -angle, -projection_distance)?,
    ])
}

pub fn line_lerp(a: Point, b: Point, ratio: f64) -> Point {
    a.lerp(b, ratio)
}

pub fn distance_between_points(a: Point, b: Point) -> f64 {
    a.distance(b)
}

pub fn distance_from_origin(p: Point) -> f64 {
    p.length()
}

pub fn subtract_points(a: Point, b: Point) -> Point {
    a - b
}

pub fn sum_points(a: Point, b: Point) -> Point {
    a + b
}

pub fn scale_point(p: Point, factor: f64) -> Point {
    p * factor
}

/// Intersection of the infinite lines through `p1`,`p2` and `p3`,`p4`.
pub fn intersect_line_line(
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
) -> Result<Point, GeometryError> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d1.perp_dot(d2);
    let scale = d1.length() * d2.length();
    if denom.abs() <= EPSILON * scale.max(EPSILON) {
        return Err(GeometryError::ParallelLines { p1, p2, p3, p4 });
    }
    let t = (p3 - p1).perp_dot(d2) / denom;
    Ok(p1 + d1 * t)
}

/// Whether segments `a0`–`a1` and `b0`–`b1` cross at a point interior to
/// both. Touching end points and colinear overlaps do not count.
pub fn segments_cross(a0: Point, a1: Point, b0: Point, b1: Point) -> bool {
    let side = |p: Point, q0: Point, q1: Point| {
        let d = q1 - q0;
        let cross = d.perp_dot(p - q0);
        if cross.abs() <= EPSILON * d.length().max(1.0) {
            0.0
        } else {
            cross.signum()
        }
    };
    let (s0, s1) = (side(b0, a0, a1), side(b1, a0, a1));
    let (s2, s3) = (side(a0, b0, b1), side(a1, b0, b1));
    s0 * s1 < 0.0 && s2 * s3 < 0.0
}

/// First pair of non-adjacent edges of a polyline that cross each other,
/// as indices of their start points. A `closed` polyline also has the edge
/// from its last point back to its first.
pub fn polyline_crossing(points: &[Point], closed: bool) -> Option<(usize, usize)> {
    let n = points.len();
    let edge_count = if closed && n > 2 { n } else { n.saturating_sub(1) };
    for i in 0..edge_count {
        for j in i + 2..edge_count {
            if closed && i == 0 && j == n - 1 {
                continue;
            }
            let crosses = segments_cross(
                points[i],
                points[(i + 1) % n],
                points[j],
                points[(j + 1) % n],
            );
            if crosses {
                return Some((i, j));
            }
        }
    }
    None
}

/// Twice the signed area; positive for counter-clockwise winding.
pub fn signed_area_doubled(points: &[Point]) -> f64 {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.perp_dot(*b))
        .sum()
}

/// Move every edge of a closed polygon inward by `distance` and re-intersect
/// neighbouring edges.
///
/// Fails with [`GeometryError::DegenerateInset`] when the result collapses
/// or turns inside out, which happens once `distance` reaches roughly half
/// of the polygon's smallest feature. Self-intersections of non-convex
/// polygons that keep their orientation are not detected.
pub fn inset_points(points: &[Point], distance: f64) -> Result<Vec<Point>, GeometryError> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::DegenerateInset { distance });
    }
    let area = signed_area_doubled(points);
    if area.abs() < EPSILON {
        return Err(GeometryError::DegenerateInset { distance });
    }
    // inward normal is the left normal for counter-clockwise winding
    let orientation = area.signum();

    let offset_edges: Vec<(Point, Point)> = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            let normal = (b - a).normalize_or_zero().perp() * orientation * distance;
            (a + normal, b + normal)
        })
        .collect();

    let mut inset = Vec::with_capacity(n);
    for i in 0..n {
        let (prev_a, prev_b) = offset_edges[(i + n - 1) % n];
        let (next_a, next_b) = offset_edges[i];
        let corner = match intersect_line_line(prev_a, prev_b, next_a, next_b) {
            Ok(p) => p,
            // colinear neighbours: the shared offset vertex is already right
            Err(GeometryError::ParallelLines { .. }) => next_a,
            Err(e) => return Err(e),
        };
        inset.push(corner);
    }

    let inset_area = signed_area_doubled(&inset);
    if inset_area.signum() != orientation || inset_area.abs() < EPSILON {
        return Err(GeometryError::DegenerateInset { distance });
    }
    for i in 0..n {
        let before = points[(i + 1) % n] - points[i];
        let after = inset[(i + 1) % n] - inset[i];
        if before.dot(after) <= 0.0 {
            return Err(GeometryError::DegenerateInset { distance });
        }
    }
    Ok(inset)
}

/// Interior angles of a triangle by the law of cosines; `angles[i]` is
/// opposite `sides[i]`.
pub fn triangle_angles_given_sides(sides: [f64; 3]) -> Result<[f64; 3], GeometryError> {
    let [a, b, c] = sides;
    let valid = sides.iter().all(|s| s.is_finite() && *s > 0.0)
        && a + b > c
        && a + c > b
        && b + c > a;
    if !valid {
        return Err(GeometryError::InvalidTriangle { sides });
    }
    let opposite = |side: f64, u: f64, v: f64| {
        ((u * u + v * v - side * side) / (2.0 * u * v))
            .clamp(-1.0, 1.0)
            .acos()
    };
    let alpha = opposite(a, b, c);
    let beta = opposite(b, a, c);
    Ok([alpha, beta, PI - alpha - beta])
}
