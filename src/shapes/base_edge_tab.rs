//! Base edge connection tab.
//!
//! Terms used below:
//! - "base" is the crease the tab folds along
//! - "edge" is the side of the tab opposite the base
//! - "depth" is the distance from base to edge
//! - "fin" is the male part, which enters the hole of the neighbouring tab
//! - "handle" is the part of the tab that surrounds the hole
//!
//! The hole sits on the `start` half of the edge and the fin on the `end`
//! half, so two tabs on a closed loop of edges interlock.

use std::f64::consts::{FRAC_PI_2, PI};

use super::TabPaths;
use super::arrow_tab::{arrow_tab, arrow_tab_corners};
use super::dash::{DashPatternSpec, stroke_dash_path};
use super::generic::connected_line_segments;
use crate::defaults;
use crate::errors::NetError;
use crate::geom::{
    VERY_LARGE_NUMBER, hinged_plot, hinged_plot_by_projection_distance, hinged_plot_lerp,
    intersect_line_line, polyline_crossing, segments_cross,
};
use crate::types::Point;

/// Proportions of a base edge tab
#[derive(Clone, Debug, PartialEq)]
pub struct BaseEdgeTabSpec {
    /// Tab depth as a multiple of the ascendant tab depth
    pub tab_depth_to_ascendant_tab_depth: f64,
    pub hole_depth_to_tab_depth: f64,
    /// Lean of the hole's start wall away from upright, radians
    pub hole_taper: f64,
    /// Hole width as a fraction of half the edge
    pub hole_breadth_to_half_width: f64,
    pub fin_depth_to_tab_depth: f64,
    /// Shifts hole and fin toward (positive) or away from (negative) the
    /// midpoint, as a fraction of the handle thickness
    pub fin_offset_ratio: f64,
}

impl Default for BaseEdgeTabSpec {
    fn default() -> Self {
        BaseEdgeTabSpec {
            tab_depth_to_ascendant_tab_depth: defaults::TAB_DEPTH_TO_ASCENDANT_TAB_DEPTH,
            hole_depth_to_tab_depth: defaults::HOLE_DEPTH_TO_TAB_DEPTH,
            hole_taper: defaults::HOLE_TAPER,
            hole_breadth_to_half_width: defaults::HOLE_BREADTH_TO_HALF_WIDTH,
            fin_depth_to_tab_depth: defaults::FIN_DEPTH_TO_TAB_DEPTH,
            fin_offset_ratio: defaults::FIN_OFFSET_RATIO,
        }
    }
}

/// Build the tab for the base edge `start`→`end`.
///
/// The tab is scaled by `ascendant_edge_tab_depth` so it stays in
/// proportion with the ascendant tabs of the same net. Tabs too deep for
/// their edge fold their outline over itself and are rejected with
/// [`NetError::TabOverlap`].
pub fn base_edge_connection_tab(
    start: Point,
    end: Point,
    ascendant_edge_tab_depth: f64,
    spec: &BaseEdgeTabSpec,
    score_dash: &DashPatternSpec,
) -> Result<TabPaths, NetError> {
    let tab_depth = spec.tab_depth_to_ascendant_tab_depth * ascendant_edge_tab_depth;
    let mid = hinged_plot_lerp(start, end, 0.0, 0.5);

    let handle_thickness = (1.0 - spec.hole_breadth_to_half_width) / 2.0;
    let offset = spec.fin_offset_ratio * handle_thickness;
    // handle widths beside the edge ends and beside the midpoint
    let outer_ratio = handle_thickness + offset;
    let inner_ratio = handle_thickness - offset;

    let hole_bases = [
        hinged_plot_lerp(start, mid, 0.0, outer_ratio),
        hinged_plot_lerp(mid, start, 0.0, inner_ratio),
    ];
    let hole_theta = FRAC_PI_2 - spec.hole_taper;
    let hole_depth = tab_depth * spec.hole_depth_to_tab_depth;
    let hole_edges = [
        hinged_plot_by_projection_distance(hole_bases[0], hole_bases[1], hole_theta, hole_depth)?,
        hinged_plot_by_projection_distance(hole_bases[1], hole_bases[0], FRAC_PI_2, -hole_depth)?,
    ];
    let hole = [hole_bases[0], hole_edges[0], hole_edges[1], hole_bases[1]];

    let fin_bases = [
        hinged_plot_lerp(mid, end, 0.0, inner_ratio),
        hinged_plot_lerp(end, mid, 0.0, outer_ratio),
    ];
    let fin_depth = spec.fin_depth_to_tab_depth * tab_depth;
    let fin_depth_to_base = fin_depth / fin_bases[0].distance(fin_bases[1]);
    let fin = arrow_tab(
        fin_bases[0],
        fin_bases[1],
        defaults::ARROW_ROUNDING_RATIO,
        fin_depth_to_base,
        hole_theta,
        score_dash,
    )?;

    let handle_edges = [
        hinged_plot_by_projection_distance(start, fin_bases[0], hole_theta, tab_depth)?,
        hinged_plot_by_projection_distance(
            fin_bases[0],
            start,
            defaults::HANDLE_RETURN_ANGLE,
            -tab_depth,
        )?,
    ];

    let mut handle_corners = vec![start, handle_edges[0]];
    handle_corners.extend(handle_valley(mid, end, tab_depth, handle_edges));
    handle_corners.extend([handle_edges[1], fin_bases[0]]);

    let mut outline = handle_corners.clone();
    let fin_corners = arrow_tab_corners(fin_bases[0], fin_bases[1], fin_depth_to_base, hole_theta)?;
    outline.extend(&fin_corners[1..]);
    outline.push(end);
    if tab_crosses_itself(&outline, &hole) {
        crate::log::debug!(tab_depth, edge_length = start.distance(end), "base edge tab crosses itself");
        return Err(NetError::TabOverlap {
            edge_length: start.distance(end),
            tab_depth,
        });
    }

    let mut cut = connected_line_segments(&hole)?;
    cut.close();
    cut.concat_path(&connected_line_segments(&handle_corners)?);
    // the fin's leading move would break the outline
    cut.concat_path(&fin.cut.slice_without_continuity(1..));
    cut.line_to(end)?;

    let mut score = stroke_dash_path(start, hole_bases[0], score_dash)?;
    score
        .concat_path(&stroke_dash_path(hole_bases[1], fin_bases[0], score_dash)?)
        .concat_path(&fin.score);

    crate::log::debug!(
        tab_depth,
        fin_depth,
        cut_commands = cut.len(),
        "built base edge tab"
    );
    Ok(TabPaths { cut, score })
}

/// Whether the outline (closed along the base) or the hole crosses itself,
/// or the two cross each other.
fn tab_crosses_itself(outline: &[Point], hole: &[Point]) -> bool {
    if polyline_crossing(outline, true).is_some() || polyline_crossing(hole, true).is_some() {
        return true;
    }
    closed_edges(hole).any(|(h0, h1)| {
        closed_edges(outline).any(|(o0, o1)| segments_cross(h0, h1, o0, o1))
    })
}

fn closed_edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}

/// A V-shaped dip in the handle edge over the midpoint, giving the fin of
/// the neighbouring tab room to swing in.
///
/// Empty when the dip would not fit between the handle corners.
fn handle_valley(mid: Point, end: Point, tab_depth: f64, handle_edges: [Point; 2]) -> Vec<Point> {
    let dip = hinged_plot(mid, end, FRAC_PI_2, defaults::VALLEY_DEPTH_TO_TAB_DEPTH * tab_depth);
    let casters = [
        hinged_plot(dip, mid, PI + defaults::VALLEY_WALL_ANGLE, VERY_LARGE_NUMBER),
        hinged_plot(dip, mid, PI - defaults::VALLEY_WALL_ANGLE, VERY_LARGE_NUMBER),
    ];
    let [handle_start, handle_end] = handle_edges;
    let span = handle_end - handle_start;
    if span.length_squared() == 0.0 {
        return Vec::new();
    }

    let mut walls = [dip; 2];
    for (wall, caster) in walls.iter_mut().zip(casters) {
        match intersect_line_line(handle_start, handle_end, dip, caster) {
            Ok(p) => *wall = p,
            Err(_) => return Vec::new(),
        }
    }
    let along = |p: Point| (p - handle_start).dot(span) / span.length_squared();
    let (t0, t1) = (along(walls[0]), along(walls[1]));
    if !(0.0 < t0 && t0 < t1 && t1 < 1.0) {
        crate::log::trace!(t0, t1, "handle valley does not fit, leaving the handle straight");
        return Vec::new();
    }
    vec![walls[0], dip, walls[1]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;
    use crate::types::pt;
    use proptest::prelude::*;

    fn spec(hole_breadth_to_half_width: f64) -> BaseEdgeTabSpec {
        BaseEdgeTabSpec {
            hole_breadth_to_half_width,
            ..BaseEdgeTabSpec::default()
        }
    }

    fn end_point(command: &PathCommand) -> Point {
        command.end_point().unwrap()
    }

    /// Tab along (0,0)→(length,0) with the default score
    fn flat_tab(length: f64, ascendant_depth: f64, spec: &BaseEdgeTabSpec) -> Result<TabPaths, NetError> {
        base_edge_connection_tab(
            pt(0.0, 0.0),
            pt(length, 0.0),
            ascendant_depth,
            spec,
            &DashPatternSpec::default(),
        )
    }

    /// Hole bases, then fin bases, read back from the cut
    fn bases(tab: &TabPaths) -> ([f64; 2], [f64; 2]) {
        let commands = tab.cut.commands();
        let hole = [end_point(&commands[0]).x, end_point(&commands[3]).x];
        // the handle comes back down to the base where the fin starts
        let fin_start = commands[6..]
            .iter()
            .map(end_point)
            .find(|p| p.y.abs() < 1e-12)
            .unwrap();
        // the fin ends just before the closing line to the edge end
        let fin_end = end_point(&commands[commands.len() - 2]);
        (hole, [fin_start.x, fin_end.x])
    }

    #[test]
    fn hole_sits_in_the_start_half() {
        let tab = flat_tab(40.0, 2.0, &spec(0.4)).unwrap();
        let commands = tab.cut.commands();
        let hole_start = end_point(&commands[0]);
        let hole_end = end_point(&commands[3]);
        for base in [hole_start, hole_end] {
            assert!(base.y.abs() < 1e-12);
            assert!(base.x > 0.0 && base.x < 20.0, "hole base {} outside (0, 20)", base);
        }
        assert!(hole_start.x < hole_end.x);
        assert_eq!(commands[4], PathCommand::Close);
    }

    #[test]
    fn tab_depth_scales_with_ascendant_depth() {
        // tab depth 1.5 * 2 = 3; hole depth is half of that
        let tab = flat_tab(40.0, 2.0, &spec(0.4)).unwrap();
        let commands = tab.cut.commands();
        assert!((end_point(&commands[1]).y - 1.5).abs() < 1e-9);
        assert!((end_point(&commands[2]).y - 1.5).abs() < 1e-9);
        // handle corner after the start
        assert!((end_point(&commands[6]).y - 3.0).abs() < 1e-9);
    }

    #[test]
    fn positive_offset_moves_hole_and_fin_toward_the_midpoint() {
        let centered = flat_tab(40.0, 2.0, &spec(0.5)).unwrap();
        let shifted = flat_tab(
            40.0,
            2.0,
            &BaseEdgeTabSpec {
                fin_offset_ratio: 0.5,
                ..spec(0.5)
            },
        )
        .unwrap();
        // handles are 0.25 of the half edge; an offset of half that moves
        // every base by 2.5 toward x = 20
        let (hole, fin) = bases(&centered);
        assert!((hole[0] - 5.0).abs() < 1e-9 && (hole[1] - 15.0).abs() < 1e-9);
        assert!((fin[0] - 25.0).abs() < 1e-9 && (fin[1] - 35.0).abs() < 1e-9);
        let (hole, fin) = bases(&shifted);
        assert!((hole[0] - 7.5).abs() < 1e-9, "hole start at {}", hole[0]);
        assert!((hole[1] - 17.5).abs() < 1e-9, "hole end at {}", hole[1]);
        assert!((fin[0] - 22.5).abs() < 1e-9, "fin start at {}", fin[0]);
        assert!((fin[1] - 32.5).abs() < 1e-9, "fin end at {}", fin[1]);
    }

    #[test]
    fn outline_runs_from_start_to_end() {
        let tab = flat_tab(40.0, 2.0, &BaseEdgeTabSpec::default()).unwrap();
        let commands = tab.cut.commands();
        assert_eq!(commands[5], PathCommand::Move(pt(0.0, 0.0)));
        assert_eq!(tab.cut.current_point(), Some(pt(40.0, 0.0)));
        // one move for the hole, one for the outline
        let moves = commands
            .iter()
            .filter(|c| matches!(c, PathCommand::Move(_)))
            .count();
        assert_eq!(moves, 2);
        assert!(tab.cut.points().all(|p| p.y >= -1e-9));
    }

    #[test]
    fn valley_dips_toward_the_base() {
        let tab = flat_tab(100.0, 4.0, &BaseEdgeTabSpec::default()).unwrap();
        // tab depth 6, dip at 0.3 of that over the midpoint
        assert!(
            tab.cut
                .points()
                .any(|p| (p - pt(50.0, 1.8)).length() < 1e-9)
        );
    }

    #[test]
    fn scores_stay_on_the_base() {
        let tab = flat_tab(40.0, 2.0, &BaseEdgeTabSpec::default()).unwrap();
        assert!(!tab.score.is_empty());
        assert!(tab.score.points().all(|p| p.y.abs() < 1e-12));
    }

    #[test]
    fn deep_tab_on_short_edge_is_rejected() {
        // a fin 3.3 deep has shoulders wider than its 2.5 base
        let err = flat_tab(10.0, 2.0, &BaseEdgeTabSpec::default()).unwrap_err();
        match err {
            NetError::TabOverlap {
                edge_length,
                tab_depth,
            } => {
                assert_eq!(edge_length, 10.0);
                assert_eq!(tab_depth, 3.0);
            }
            other => panic!("expected a tab overlap, got {:?}", other),
        }
        // deep enough to fold the handle corners past each other
        assert!(matches!(
            flat_tab(10.0, 5.0, &BaseEdgeTabSpec::default()),
            Err(NetError::TabOverlap { .. })
        ));
    }

    proptest! {
        #[test]
        fn any_edge_direction_builds(
            angle in 0.0..6.28f64,
            length in 5.0..200.0f64,
            breadth in 0.5..0.9f64,
            offset in -0.5..0.5f64,
        ) {
            let end = pt(length * angle.cos(), length * angle.sin());
            let spec = BaseEdgeTabSpec {
                hole_breadth_to_half_width: breadth,
                fin_offset_ratio: offset,
                ..BaseEdgeTabSpec::default()
            };
            let tab = base_edge_connection_tab(pt(0.0, 0.0), end, length * 0.02, &spec, &DashPatternSpec::default());
            prop_assert!(tab.is_ok());
            let tab = tab.unwrap();
            let last = tab.cut.current_point().unwrap();
            prop_assert!(last.distance(end) < 1e-9);
        }

        #[test]
        fn deep_tabs_either_fail_or_stay_simple(
            angle in 0.0..6.28f64,
            length in 1.0..100.0f64,
            depth_to_length in 0.005..0.8f64,
            breadth in 0.1..0.9f64,
            offset in -0.5..0.5f64,
        ) {
            let direction = pt(angle.cos(), angle.sin());
            let end = direction * length;
            let spec = BaseEdgeTabSpec {
                hole_breadth_to_half_width: breadth,
                fin_offset_ratio: offset,
                ..BaseEdgeTabSpec::default()
            };
            let tab_depth = depth_to_length * length;
            let ascendant_depth = tab_depth / spec.tab_depth_to_ascendant_tab_depth;
            match base_edge_connection_tab(pt(0.0, 0.0), end, ascendant_depth, &spec, &DashPatternSpec::default()) {
                Ok(tab) => {
                    let commands = tab.cut.commands();
                    // the outline walks steadily from start to end
                    let along: Vec<f64> = commands[5..]
                        .iter()
                        .map(|c| end_point(c).dot(direction))
                        .collect();
                    for pair in along.windows(2) {
                        prop_assert!(pair[0] <= pair[1] + 1e-9, "outline turns back: {:?}", along);
                    }
                    // hole walls stay in order
                    let hole_top = [end_point(&commands[1]), end_point(&commands[2])];
                    prop_assert!(hole_top[0].dot(direction) < hole_top[1].dot(direction));
                }
                Err(NetError::TabOverlap { .. }) => {
                    // even the narrowest fin here fits a tab 4% as deep as its edge
                    prop_assert!(depth_to_length > 0.04);
                }
                Err(other) => prop_assert!(false, "unexpected error {}", other),
            }
        }

        #[test]
        fn valley_is_left_out_when_it_has_no_room(
            handle_span in 0.01..10.0f64,
            depth in 0.1..5.0f64,
        ) {
            let (mid, end) = (pt(5.0, 0.0), pt(10.0, 0.0));
            let handle_edges = [pt(5.0 - handle_span / 2.0, depth), pt(5.0 + handle_span / 2.0, depth)];
            let valley = handle_valley(mid, end, depth, handle_edges);
            // the walls meet the handle 0.7 of the depth either side of the dip
            let fits = 0.7 * depth < handle_span / 2.0;
            if fits {
                prop_assert_eq!(valley.len(), 3);
                let xs: Vec<f64> = valley.iter().map(|p| p.x).collect();
                prop_assert!(handle_edges[0].x < xs[0] && xs[0] < xs[1] && xs[1] < xs[2] && xs[2] < handle_edges[1].x);
            } else if valley.len() == 3 {
                // only on the boundary, within rounding
                prop_assert!((0.7 * depth - handle_span / 2.0).abs() < 1e-9);
            }
        }
    }
}
