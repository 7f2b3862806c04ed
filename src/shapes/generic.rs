//! Polyline, polygon and rounded-corner path builders.

use crate::defaults::CORNER_BEZIER_KAPPA;
use crate::errors::PathError;
use crate::path::PathData;
use crate::types::{EPSILON, Point};

/// How far from each vertex a rounded corner starts
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoundingDistance {
    /// A fixed length, clamped to half the shorter adjacent edge
    Absolute(f64),
    /// A fraction of half the shorter adjacent edge; 1 rounds as far as possible
    Ratio(f64),
}

impl RoundingDistance {
    fn resolve(self, half_shorter_edge: f64) -> f64 {
        let distance = match self {
            RoundingDistance::Absolute(d) => d,
            RoundingDistance::Ratio(r) => r * half_shorter_edge,
        };
        distance.clamp(0.0, half_shorter_edge)
    }
}

/// Move to the first point, then a line to each following point
pub fn connected_line_segments(points: &[Point]) -> Result<PathData, PathError> {
    let mut path = PathData::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first)?;
        for p in rest {
            path.line_to(*p)?;
        }
    }
    Ok(path)
}

/// [`connected_line_segments`] followed by a close
pub fn closed_polygon_path(points: &[Point]) -> Result<PathData, PathError> {
    let mut path = connected_line_segments(points)?;
    if !path.is_empty() {
        path.close();
    }
    Ok(path)
}

/// An open polyline whose interior vertices are replaced by cubic curves.
///
/// Each corner starts `rounding` before its vertex and ends `rounding`
/// after it, where the distance is clamped to half the shorter adjacent
/// edge so neighbouring corners never cross. Both control points sit on
/// the edges between the transition points and the vertex.
pub fn rounded_edge_path(
    points: &[Point],
    rounding: RoundingDistance,
) -> Result<PathData, PathError> {
    let mut path = PathData::new();
    let Some((first, rest)) = points.split_first() else {
        return Ok(path);
    };
    path.move_to(*first)?;

    for window in points.windows(3) {
        let [prev, vertex, next] = [window[0], window[1], window[2]];
        let to_prev = prev - vertex;
        let to_next = next - vertex;
        let half_shorter = to_prev.length().min(to_next.length()) / 2.0;
        let distance = rounding.resolve(half_shorter);
        if distance < EPSILON {
            path.line_to(vertex)?;
            continue;
        }
        let corner_start = vertex + to_prev.normalize() * distance;
        let corner_end = vertex + to_next.normalize() * distance;
        path.line_to(corner_start)?.cubic_bezier(
            corner_start.lerp(vertex, CORNER_BEZIER_KAPPA),
            corner_end.lerp(vertex, CORNER_BEZIER_KAPPA),
            corner_end,
        )?;
    }

    if let Some(last) = rest.last() {
        path.line_to(*last)?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;
    use crate::types::pt;
    use proptest::prelude::*;

    #[test]
    fn polyline_and_polygon() {
        let points = [pt(0.0, 0.0), pt(4.0, 0.0), pt(4.0, 3.0)];
        insta::assert_snapshot!(
            connected_line_segments(&points).unwrap().to_d(),
            @"M 0,0 L 4,0 L 4,3"
        );
        let polygon = closed_polygon_path(&points).unwrap();
        assert_eq!(polygon.commands().last(), Some(&PathCommand::Close));
        assert!(closed_polygon_path(&[]).unwrap().is_empty());
    }

    #[test]
    fn polygon_stays_closed_through_its_d_string() {
        let points = [pt(1.5, -2.0), pt(7.25, 0.5), pt(3.0, 6.0), pt(-1.0, 2.0)];
        let polygon = closed_polygon_path(&points).unwrap();
        let reparsed = PathData::from_d(&polygon.to_d()).unwrap();
        assert_eq!(reparsed, polygon);

        let commands = reparsed.commands();
        assert_eq!(commands.len(), points.len() + 1);
        assert_eq!(commands.first(), Some(&PathCommand::Move(points[0])));
        assert_eq!(commands.last(), Some(&PathCommand::Close));
        // closing brings the pen back to where it started
        assert_eq!(reparsed.current_point(), Some(points[0]));
        assert_eq!(
            commands[commands.len() - 2].end_point(),
            Some(points[points.len() - 1])
        );
    }

    #[test]
    fn rounded_corner_uses_absolute_distance() {
        let points = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)];
        let path = rounded_edge_path(&points, RoundingDistance::Absolute(2.0)).unwrap();
        let commands = path.commands();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[1], PathCommand::Line(pt(8.0, 0.0)));
        match commands[2] {
            PathCommand::CubicBezier { ctrl1, ctrl2, to } => {
                assert_eq!(to, pt(10.0, 2.0));
                assert!(ctrl1.y.abs() < 1e-12 && ctrl1.x > 8.0 && ctrl1.x < 10.0);
                assert!((ctrl2.x - 10.0).abs() < 1e-12 && ctrl2.y > 0.0 && ctrl2.y < 2.0);
            }
            ref other => panic!("expected cubic, got {:?}", other),
        }
        assert_eq!(commands[3], PathCommand::Line(pt(10.0, 10.0)));
    }

    #[test]
    fn rounding_is_clamped_to_half_edge() {
        let points = [pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 10.0)];
        let path = rounded_edge_path(&points, RoundingDistance::Absolute(50.0)).unwrap();
        assert_eq!(path.commands()[1], PathCommand::Line(pt(1.0, 0.0)));
    }

    #[test]
    fn zero_rounding_is_a_polyline() {
        let points = [pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 1.0)];
        assert_eq!(
            rounded_edge_path(&points, RoundingDistance::Ratio(0.0)).unwrap(),
            connected_line_segments(&points).unwrap()
        );
    }

    proptest! {
        #[test]
        fn rounding_stays_near_vertices(
            coords in prop::collection::vec((-20.0..20.0f64, -20.0..20.0f64), 3..8),
            ratio in 0.0..3.0f64,
        ) {
            let points: Vec<Point> = coords.into_iter().map(|(x, y)| pt(x, y)).collect();
            let path = rounded_edge_path(&points, RoundingDistance::Ratio(ratio)).unwrap();
            let mut vertex = 1;
            for command in path.commands() {
                if let PathCommand::CubicBezier { ctrl1, ctrl2, .. } = command {
                    let [prev, v, next] = [points[vertex - 1], points[vertex], points[vertex + 1]];
                    let bound = prev.distance(v).min(next.distance(v)) / 2.0 + 1e-9;
                    prop_assert!(ctrl1.distance(v) <= bound);
                    prop_assert!(ctrl2.distance(v) <= bound);
                    vertex += 1;
                } else if let PathCommand::Line(to) = command {
                    // a straight corner only when rounding collapsed at this vertex
                    if vertex < points.len() - 1 && *to == points[vertex] {
                        vertex += 1;
                    }
                }
            }
        }
    }
}
