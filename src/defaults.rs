//! Default tab, score and net settings.
//!
//! Lengths are in output units (whatever the caller draws in); ratios are
//! unitless; angles are radians.

use std::f64::consts::PI;

/// Golden ratio, used by the inter-face score rhythm
pub const PHI: f64 = 1.618_033_988_749_895;

// Tab scores: short even dashes
pub const TAB_SCORE_DASHARRAY: [f64; 2] = [2.0, 1.0];
pub const TAB_SCORE_DASH_LENGTH: f64 = 0.1;
pub const TAB_SCORE_DASH_OFFSET_RATIO: f64 = 0.0;

// Inter-face scores: a long-short rhythm that is easy to tell apart from tabs
pub const INTER_FACE_SCORE_DASHARRAY: [f64; 5] = [PHI, 1.0, 1.0 / PHI, 1.0, PHI];
pub const INTER_FACE_SCORE_DASH_LENGTH: f64 = 1.0;
pub const INTER_FACE_SCORE_DASH_OFFSET_RATIO: f64 = 0.75;

/// Upper bound on the dash runs along one score line
pub const MAX_DASH_RUNS: usize = 1_000_000;

/// Named dash rhythms offered as presets for score lines
pub const DASH_PATTERN_PRESETS: &[(&str, &[f64])] = &[
    ("even", &[1.0, 1.0]),
    ("long", &TAB_SCORE_DASHARRAY),
    ("short", &[1.0, 2.0]),
    ("dot-dash", &[1.0, 1.0, 3.0, 1.0]),
    ("golden", &INTER_FACE_SCORE_DASHARRAY),
];

// Ascendant edge tabs
pub const TABS_COUNT: u32 = 3;
pub const TAB_DEPTH_TO_TRAVERSAL_LENGTH: f64 = 0.048_106_060_605_998_47;
pub const TAB_START_GAP_TO_TAB_DEPTH: f64 = 0.5;
pub const HOLE_REACH_TO_TAB_DEPTH: f64 = 0.1;
pub const HOLE_WIDTH_RATIO: f64 = 0.4;
pub const HOLE_FLAP_TAPER_ANGLE: f64 = PI / 10.0;
pub const FLAP_ROUNDING_DISTANCE_RATIO: f64 = 1.0;
pub const TAB_CONTROL_POINTS_PROTRUSION: f64 = 0.6;
pub const TAB_CONTROL_POINTS_ANGLE: f64 = 0.5;
pub const TAB_EDGE_ENDPOINTS_INDENTATION: f64 = 0.3;

// Base edge tab
pub const TAB_DEPTH_TO_ASCENDANT_TAB_DEPTH: f64 = 1.5;
pub const HOLE_DEPTH_TO_TAB_DEPTH: f64 = 0.5;
pub const HOLE_TAPER: f64 = PI / 4.5;
pub const HOLE_BREADTH_TO_HALF_WIDTH: f64 = 0.5;
pub const FIN_DEPTH_TO_TAB_DEPTH: f64 = 1.1;
pub const FIN_OFFSET_RATIO: f64 = 0.0;

// Fin ("arrow") tab shape
pub const ARROW_SHOULDER_TO_DEPTH: f64 = 0.6;
pub const ARROW_ROUNDING_RATIO: f64 = 0.5;

// Net assembly
pub const FLAP_APEX_IMPINGE_MARGIN: f64 = PI / 12.0;
pub const FLAP_BASE_ANGLE: f64 = PI / 3.0;
pub const SHAPE_HEIGHT: f64 = 22.0;
pub const DECORATION_BORDER_INSET: f64 = 0.2;

// Base tab handle valley: depth of the dip and half-angle of its walls
pub const VALLEY_DEPTH_TO_TAB_DEPTH: f64 = 0.3;
pub const VALLEY_WALL_ANGLE: f64 = PI / 4.0;
pub const HANDLE_RETURN_ANGLE: f64 = 0.6 * PI;

/// Kappa for approximating a quarter circle with one cubic bezier
pub const CORNER_BEZIER_KAPPA: f64 = 0.552_284_749_831;

pub const DEFAULT_POLYHEDRON: &str = "great-stellated-dodecahedron";

// Dieline styling for standalone SVG output
pub const CUT_STROKE: &str = "#FF244D";
pub const SCORE_STROKE: &str = "#BDFF48";
pub const DIE_LINE_STROKE_WIDTH: f64 = 0.1;
