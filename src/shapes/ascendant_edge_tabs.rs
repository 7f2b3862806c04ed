//! Ascendant edge connection tabs.
//!
//! An ascendant edge (apex to base corner) is joined to its partner with
//! several small tabs. The male side gets bezier-walled tabs protruding to
//! the left of `start`→`end`; the female side gets a matching hole for each
//! tab on the right. Where each side is cut along the edge line it is not
//! scored, so score and cut never overlap.

use std::f64::consts::{FRAC_PI_2, PI};

use super::TabPaths;
use super::dash::{DashPatternSpec, ratio_ranges_path, stroke_dash_path_ratios};
use super::generic::closed_polygon_path;
use crate::defaults;
use crate::errors::{NetError, PathError};
use crate::geom::{hinged_plot, line_lerp, symmetric_hinge_plot_by_projection_distance};
use crate::path::PathData;
use crate::range::{RatioRange, complement, subtract_range_set};
use crate::types::Point;

/// Layout and shape of the tabs along one ascendant edge
#[derive(Clone, Debug, PartialEq)]
pub struct AscendantEdgeTabsSpec {
    pub tabs_count: u32,
    /// Tab depth as a fraction of the edge length
    pub tab_depth_to_traversal_length: f64,
    /// Untabbed run at the start of the edge, in tab depths
    pub tab_start_gap_to_tab_depth: f64,
    /// How far into the female flap the holes reach, in tab depths
    pub hole_reach_to_tab_depth: f64,
    /// Fraction of each tab slot taken by the tab
    pub hole_width_ratio: f64,
    /// Inward lean of the hole walls, radians
    pub hole_flap_taper_angle: f64,
    /// Corner rounding of the female flap outline, see
    /// [`RoundingDistance::Ratio`](super::generic::RoundingDistance::Ratio)
    pub flap_rounding_distance_ratio: f64,
    /// Bezier handle length, in tab depths
    pub tab_control_points_protrusion: f64,
    /// Lean of the base handles: 0 runs along the edge, 1 is perpendicular
    pub tab_control_points_angle: f64,
    /// How far the tab's outer edge is pulled in from each end, in tab depths
    pub tab_edge_endpoints_indentation: f64,
}

impl Default for AscendantEdgeTabsSpec {
    fn default() -> Self {
        AscendantEdgeTabsSpec {
            tabs_count: defaults::TABS_COUNT,
            tab_depth_to_traversal_length: defaults::TAB_DEPTH_TO_TRAVERSAL_LENGTH,
            tab_start_gap_to_tab_depth: defaults::TAB_START_GAP_TO_TAB_DEPTH,
            hole_reach_to_tab_depth: defaults::HOLE_REACH_TO_TAB_DEPTH,
            hole_width_ratio: defaults::HOLE_WIDTH_RATIO,
            hole_flap_taper_angle: defaults::HOLE_FLAP_TAPER_ANGLE,
            flap_rounding_distance_ratio: defaults::FLAP_ROUNDING_DISTANCE_RATIO,
            tab_control_points_protrusion: defaults::TAB_CONTROL_POINTS_PROTRUSION,
            tab_control_points_angle: defaults::TAB_CONTROL_POINTS_ANGLE,
            tab_edge_endpoints_indentation: defaults::TAB_EDGE_ENDPOINTS_INDENTATION,
        }
    }
}

impl AscendantEdgeTabsSpec {
    /// Tab depth for an edge of the given length
    pub fn tab_depth(&self, edge_length: f64) -> f64 {
        self.tab_depth_to_traversal_length * edge_length
    }

    /// Where the tabs sit along the edge.
    ///
    /// After the start gap the edge is split into `tabs_count` equal slots;
    /// each tab takes `hole_width_ratio` of its slot, centred.
    pub fn tab_interval_ratios(&self) -> Result<Vec<RatioRange>, NetError> {
        if self.tabs_count == 0 {
            return Err(NetError::TabLayout {
                reason: "at least one tab is needed".into(),
            });
        }
        let start_gap = self.tab_start_gap_to_tab_depth * self.tab_depth_to_traversal_length;
        if !(0.0..1.0).contains(&start_gap) {
            return Err(NetError::TabLayout {
                reason: format!("start gap of {start_gap} leaves no room for tabs"),
            });
        }
        if !(self.hole_width_ratio > 0.0 && self.hole_width_ratio <= 1.0) {
            return Err(NetError::TabLayout {
                reason: format!(
                    "hole width ratio {} must be in (0, 1]",
                    self.hole_width_ratio
                ),
            });
        }

        let slot = (1.0 - start_gap) / f64::from(self.tabs_count);
        let margin = slot * (1.0 - self.hole_width_ratio) / 2.0;
        Ok((0..self.tabs_count)
            .map(|i| {
                let slot_start = start_gap + f64::from(i) * slot;
                [slot_start + margin, slot_start + slot - margin]
            })
            .collect())
    }

    /// The complement of [`Self::tab_interval_ratios`] within [0, 1]
    pub fn tab_gap_interval_ratios(&self) -> Result<Vec<RatioRange>, NetError> {
        Ok(complement(&self.tab_interval_ratios()?))
    }
}

/// Both halves of an ascendant edge joint
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AscendantEdgeConnectionPaths {
    pub male: TabPaths,
    pub female: TabPaths,
}

/// Score ratio ranges for each side of the joint
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRatios {
    /// Dashes outside the tab zones, where the female side has no hole
    pub female: Vec<RatioRange>,
    /// Dashes inside the tab zones, where the male tabs fold
    pub male: Vec<RatioRange>,
}

/// Split the edge's dash pattern between the two sides
pub fn score_ratios(
    start: Point,
    end: Point,
    score_dash: &DashPatternSpec,
    tab_intervals: &[RatioRange],
    gap_intervals: &[RatioRange],
) -> Result<ScoreRatios, PathError> {
    let dashes = stroke_dash_path_ratios(start, end, score_dash)?;
    Ok(ScoreRatios {
        female: subtract_range_set(&dashes, tab_intervals),
        male: subtract_range_set(&dashes, gap_intervals),
    })
}

/// Build male tabs and female holes along `start`→`end`.
///
/// `tab_intervals` and `gap_intervals` partition the edge, usually from
/// [`AscendantEdgeTabsSpec::tab_interval_ratios`]. One tab is drawn for
/// each of the first `tabs_count` tab intervals.
pub fn ascendant_edge_connection_tabs(
    start: Point,
    end: Point,
    spec: &AscendantEdgeTabsSpec,
    score_dash: &DashPatternSpec,
    tab_intervals: &[RatioRange],
    gap_intervals: &[RatioRange],
) -> Result<AscendantEdgeConnectionPaths, NetError> {
    let tabs_count = spec.tabs_count as usize;
    if tab_intervals.len() < tabs_count {
        return Err(NetError::TabLayout {
            reason: format!(
                "{} tabs requested but only {} intervals given",
                tabs_count,
                tab_intervals.len()
            ),
        });
    }

    let tab_depth = spec.tab_depth(start.distance(end));
    let control_point_distance = tab_depth * spec.tab_control_points_protrusion;
    let edge_inset = spec.tab_edge_endpoints_indentation * tab_depth;
    let base_control_angle = spec.tab_control_points_angle * FRAC_PI_2;

    let mut male_cut = PathData::new();
    male_cut.move_to(start)?;
    let mut female_cut = PathData::new();

    for &[from, to] in &tab_intervals[..tabs_count] {
        let tab_base_start = line_lerp(start, end, from);
        let tab_base_end = line_lerp(start, end, to);

        let hole = symmetric_hinge_plot_by_projection_distance(
            tab_base_start,
            tab_base_end,
            -FRAC_PI_2 + spec.hole_flap_taper_angle,
            -spec.hole_reach_to_tab_depth * tab_depth,
        )?;
        female_cut.concat_path(&closed_polygon_path(&[
            tab_base_start,
            hole[0],
            hole[1],
            tab_base_end,
        ])?);

        let [edge_start_unindented, edge_end_unindented] =
            symmetric_hinge_plot_by_projection_distance(
                tab_base_start,
                tab_base_end,
                FRAC_PI_2,
                tab_depth,
            )?;
        let tab_edge_start = hinged_plot(edge_start_unindented, edge_end_unindented, 0.0, edge_inset);
        let tab_edge_end = hinged_plot(edge_end_unindented, edge_start_unindented, 0.0, edge_inset);

        let base_control_start = hinged_plot(
            tab_base_start,
            tab_base_end,
            PI - base_control_angle,
            control_point_distance,
        );
        let base_control_end = hinged_plot(
            tab_base_end,
            tab_base_start,
            PI + base_control_angle,
            control_point_distance,
        );
        let edge_control_start = hinged_plot(tab_edge_start, tab_edge_end, PI, control_point_distance);
        let edge_control_end = hinged_plot(tab_edge_end, tab_edge_start, PI, control_point_distance);

        male_cut
            .line_to(tab_base_start)?
            .cubic_bezier(base_control_start, edge_control_start, tab_edge_start)?
            .line_to(tab_edge_end)?
            .cubic_bezier(edge_control_end, base_control_end, tab_base_end)?;
    }
    male_cut.line_to(end)?;

    let scores = score_ratios(start, end, score_dash, tab_intervals, gap_intervals)?;
    crate::log::debug!(
        tab_depth,
        tabs = tabs_count,
        female_dashes = scores.female.len(),
        male_dashes = scores.male.len(),
        "built ascendant edge tabs"
    );

    Ok(AscendantEdgeConnectionPaths {
        male: TabPaths {
            cut: male_cut,
            score: ratio_ranges_path(start, end, &scores.male)?,
        },
        female: TabPaths {
            cut: female_cut,
            score: ratio_ranges_path(start, end, &scores.female)?,
        },
    })
}
