//! Dashed score lines.
//!
//! A dash pattern walks a segment alternating "on" and "off" runs. The
//! pattern phase is anchored by `stroke_dash_offset_ratio`, so two segments
//! with the same spec start in the same place of the rhythm.

use crate::defaults;
use crate::errors::PathError;
use crate::geom::line_lerp;
use crate::path::PathData;
use crate::range::RatioRange;
use crate::types::{EPSILON, Point};

/// How a score line is dashed
#[derive(Clone, Debug, PartialEq)]
pub struct DashPatternSpec {
    /// Alternating on/off run lengths in pattern units. An odd-length array
    /// is repeated once, as SVG `stroke-dasharray` does.
    pub relative_stroke_dasharray: Vec<f64>,
    /// Absolute length of one pattern unit
    pub stroke_dash_length: f64,
    /// Phase at the segment start, as a fraction of one pattern cycle
    pub stroke_dash_offset_ratio: f64,
}

impl Default for DashPatternSpec {
    fn default() -> Self {
        Self::tab_score()
    }
}

impl DashPatternSpec {
    pub fn new(dasharray: &[f64], length: f64, offset_ratio: f64) -> Self {
        DashPatternSpec {
            relative_stroke_dasharray: dasharray.to_vec(),
            stroke_dash_length: length,
            stroke_dash_offset_ratio: offset_ratio,
        }
    }

    /// Short dashes for tab creases
    pub fn tab_score() -> Self {
        Self::new(
            &defaults::TAB_SCORE_DASHARRAY,
            defaults::TAB_SCORE_DASH_LENGTH,
            defaults::TAB_SCORE_DASH_OFFSET_RATIO,
        )
    }

    /// The rhythm used between neighbouring faces
    pub fn inter_face_score() -> Self {
        Self::new(
            &defaults::INTER_FACE_SCORE_DASHARRAY,
            defaults::INTER_FACE_SCORE_DASH_LENGTH,
            defaults::INTER_FACE_SCORE_DASH_OFFSET_RATIO,
        )
    }

    /// Look up one of [`defaults::DASH_PATTERN_PRESETS`] by name
    pub fn preset(name: &str, length: f64) -> Option<Self> {
        defaults::DASH_PATTERN_PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .map(|(_, dasharray)| Self::new(dasharray, length, 0.0))
    }

    /// Absolute run lengths of one full cycle, always even in count.
    /// Non-positive entries are skipped.
    fn cycle(&self) -> Vec<f64> {
        let mut runs: Vec<f64> = self
            .relative_stroke_dasharray
            .iter()
            .map(|r| r * self.stroke_dash_length)
            .collect();
        if runs.len() % 2 == 1 {
            runs.extend_from_within(..);
        }
        runs
    }
}

/// One run of the dash pattern along a segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DashInterval {
    pub range: RatioRange,
    pub on: bool,
}

/// Every on and off run along `start`→`end`, in order, as ratios of the
/// segment length. Consecutive intervals share their boundary, the first
/// starts at 0 and the last ends at exactly 1.
///
/// Fails on non-finite end points, and when the pattern is so fine for the
/// segment that it would need more than [`defaults::MAX_DASH_RUNS`] runs.
pub fn stroke_dash_intervals(
    start: Point,
    end: Point,
    spec: &DashPatternSpec,
) -> Result<Vec<DashInterval>, PathError> {
    for p in [start, end] {
        if !p.is_finite() {
            return Err(PathError::MalformedPoint { x: p.x, y: p.y });
        }
    }
    let length = start.distance(end);
    if length < EPSILON {
        return Ok(Vec::new());
    }

    let runs: Vec<(f64, bool)> = spec
        .cycle()
        .into_iter()
        .enumerate()
        .map(|(i, run)| (run, i % 2 == 0))
        .filter(|(run, _)| run.is_finite() && *run > EPSILON)
        .collect();
    let cycle_length: f64 = runs.iter().map(|(run, _)| run).sum();
    if runs.is_empty() || cycle_length < EPSILON {
        // nothing to alternate: a solid line
        return Ok(vec![DashInterval {
            range: [0.0, 1.0],
            on: true,
        }]);
    }

    // every cycle contributes all of its runs, plus a partial cycle each end
    let estimated_runs = (length / cycle_length + 2.0) * runs.len() as f64;
    if estimated_runs > defaults::MAX_DASH_RUNS as f64 {
        return Err(PathError::TooManyDashes {
            length,
            cycle_length,
            limit: defaults::MAX_DASH_RUNS,
        });
    }

    // find where in the cycle the segment begins
    let mut phase = (spec.stroke_dash_offset_ratio * cycle_length).rem_euclid(cycle_length);
    let mut index = 0;
    while phase >= runs[index].0 {
        phase -= runs[index].0;
        index = (index + 1) % runs.len();
    }

    let mut intervals = Vec::new();
    let mut position = 0.0;
    let mut remaining_in_run = runs[index].0 - phase;
    while position < length {
        let next = (position + remaining_in_run).min(length);
        let on = runs[index].1;
        let range_end = if next >= length { 1.0 } else { next / length };
        intervals.push(DashInterval {
            range: [position / length, range_end],
            on,
        });
        position = next;
        index = (index + 1) % runs.len();
        remaining_in_run = runs[index].0;
    }
    Ok(intervals)
}

/// The "on" runs of [`stroke_dash_intervals`]
pub fn stroke_dash_path_ratios(
    start: Point,
    end: Point,
    spec: &DashPatternSpec,
) -> Result<Vec<RatioRange>, PathError> {
    Ok(stroke_dash_intervals(start, end, spec)?
        .into_iter()
        .filter(|interval| interval.on)
        .map(|interval| interval.range)
        .collect())
}

/// Move/line pairs along `start`→`end` for each ratio range
pub fn ratio_ranges_path(
    start: Point,
    end: Point,
    ranges: &[RatioRange],
) -> Result<PathData, PathError> {
    let mut path = PathData::new();
    for &[from, to] in ranges {
        path.move_to(line_lerp(start, end, from))?
            .line_to(line_lerp(start, end, to))?;
    }
    Ok(path)
}

/// The dashed score line itself
pub fn stroke_dash_path(
    start: Point,
    end: Point,
    spec: &DashPatternSpec,
) -> Result<PathData, PathError> {
    ratio_ranges_path(start, end, &stroke_dash_path_ratios(start, end, spec)?)
}
