//! Symmetric rounded "arrow" tab, used as the fin of a base edge tab.
//!
//! The tab rises from its base on the left side of `base_start`→`base_end`
//! with walls tapered toward each other, then comes to a rounded point so
//! it finds its way into a hole.

use std::f64::consts::FRAC_PI_2;

use super::TabPaths;
use super::dash::{DashPatternSpec, stroke_dash_path};
use super::generic::{RoundingDistance, rounded_edge_path};
use crate::defaults::ARROW_SHOULDER_TO_DEPTH;
use crate::errors::{GeometryError, NetError};
use crate::geom::{hinged_plot, line_lerp, symmetric_hinge_plot_by_projection_distance};
use crate::types::Point;

/// Build an arrow tab.
///
/// `depth_to_base_length` scales the tip height from the base length;
/// `taper_angle` is the angle each wall makes with the base, π/2 for
/// upright walls. The cut starts with a move to `base_start` and ends at
/// `base_end`; the score is the dashed base.
pub fn arrow_tab(
    base_start: Point,
    base_end: Point,
    rounding_ratio: f64,
    depth_to_base_length: f64,
    taper_angle: f64,
    score_dash: &DashPatternSpec,
) -> Result<TabPaths, NetError> {
    let corners = arrow_tab_corners(base_start, base_end, depth_to_base_length, taper_angle)?;
    let cut = rounded_edge_path(&corners, RoundingDistance::Ratio(rounding_ratio))?;
    let score = stroke_dash_path(base_start, base_end, score_dash)?;
    Ok(TabPaths { cut, score })
}

/// Outline of an arrow tab before its corners are rounded: base start,
/// both shoulders with the tip between them, base end.
pub fn arrow_tab_corners(
    base_start: Point,
    base_end: Point,
    depth_to_base_length: f64,
    taper_angle: f64,
) -> Result<[Point; 5], GeometryError> {
    let depth = depth_to_base_length * base_start.distance(base_end);
    let [shoulder_start, shoulder_end] = symmetric_hinge_plot_by_projection_distance(
        base_start,
        base_end,
        taper_angle,
        depth * ARROW_SHOULDER_TO_DEPTH,
    )?;
    let tip = hinged_plot(line_lerp(base_start, base_end, 0.5), base_end, FRAC_PI_2, depth);
    Ok([base_start, shoulder_start, tip, shoulder_end, base_end])
}
