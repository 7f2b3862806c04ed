//! Error types with diagnostics using miette
//!
//! Every failure in this crate is a precondition violation for the current
//! parameter set. Nothing is recovered locally; errors surface to whoever
//! asked for the net.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::Point;

// ============================================================================
// Geometry Errors
// ============================================================================

/// Geometrically impossible requests raised by the vector primitives and the
/// net assembler.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("lines are parallel: ({p1}, {p2}) and ({p3}, {p4})")]
    #[diagnostic(code(dieline::geom::parallel_lines))]
    ParallelLines {
        p1: Point,
        p2: Point,
        p3: Point,
        p4: Point,
    },

    #[error("sides {sides:?} do not form a triangle")]
    #[diagnostic(
        code(dieline::geom::invalid_triangle),
        help("each side must be shorter than the sum of the other two")
    )]
    InvalidTriangle { sides: [f64; 3] },

    #[error("cannot plot by projection distance at angle {angle} rad")]
    #[diagnostic(
        code(dieline::geom::degenerate_projection),
        help("the hinge angle must not be a multiple of π")
    )]
    DegenerateProjection { angle: f64 },

    #[error("inset of {distance} collapses the polygon")]
    #[diagnostic(
        code(dieline::geom::degenerate_inset),
        help("keep the inset below half of the polygon's smallest feature")
    )]
    DegenerateInset { distance: f64 },

    #[error("too many faces: the sum of angles at apex is greater than 360 degrees")]
    #[diagnostic(
        code(dieline::net::too_many_faces),
        help("{face_count} faces of {apex_angle_degrees:.2}° each do not fit around one apex")
    )]
    TooManyFaces {
        face_count: u32,
        apex_angle_degrees: f64,
    },

    #[error("no gap left at the apex: {face_count} faces close the full 360 degrees")]
    #[diagnostic(
        code(dieline::net::no_apex_gap),
        help("split the pyramid over more nets so the flap has room")
    )]
    NoApexGap { face_count: u32 },
}

// ============================================================================
// Path Errors
// ============================================================================

/// Errors raised while building or parsing path data
#[derive(Error, Diagnostic, Debug)]
pub enum PathError {
    #[error("point co-ordinates are not finite: ({x}, {y})")]
    #[diagnostic(
        code(dieline::path::malformed_point),
        help("a NaN or infinite co-ordinate would serialize into a broken path string")
    )]
    MalformedPoint { x: f64, y: f64 },

    #[error("invalid path data: {message}")]
    #[diagnostic(code(dieline::path::parse))]
    Parse {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("{command} command takes {expected} numbers per segment, found {found}")]
    #[diagnostic(code(dieline::path::argument_count))]
    ArgumentCount {
        command: char,
        expected: usize,
        found: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("in this command")]
        span: SourceSpan,
    },

    #[error("dash cycle of {cycle_length} is too fine for a segment {length} long")]
    #[diagnostic(
        code(dieline::path::too_many_dashes),
        help("a score line may have at most {limit} dash runs; lengthen the dashes")
    )]
    TooManyDashes {
        length: f64,
        cycle_length: f64,
        limit: usize,
    },

    #[error("path must begin with a move command")]
    #[diagnostic(code(dieline::path::missing_move))]
    MissingMove {
        #[source_code]
        src: NamedSource<String>,
        #[label("first command")]
        span: SourceSpan,
    },
}

impl PathError {
    /// Build a parse error pointing at `span` inside `source`
    pub(crate) fn parse(
        message: impl Into<String>,
        source: &str,
        span: impl Into<SourceSpan>,
    ) -> Self {
        PathError::Parse {
            message: message.into(),
            src: NamedSource::new("<path>", source.to_string()),
            span: span.into(),
        }
    }
}

// ============================================================================
// Net Errors
// ============================================================================

/// Anything that can go wrong while assembling a net
#[derive(Error, Diagnostic, Debug)]
pub enum NetError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error("unknown polyhedron: {name}")]
    #[diagnostic(code(dieline::net::unknown_polyhedron))]
    UnknownPolyhedron {
        name: String,
        #[help]
        suggestion: Option<String>,
    },

    #[error("{nets_per_pyramid} nets per pyramid does not divide {face_count} faces evenly")]
    #[diagnostic(code(dieline::net::nets_per_pyramid))]
    NetsPerPyramid {
        nets_per_pyramid: u32,
        face_count: u32,
    },

    #[error("invalid ascendant tab layout: {reason}")]
    #[diagnostic(code(dieline::net::tab_layout))]
    TabLayout { reason: String },

    #[error("base edge tab {tab_depth} deep crosses itself on an edge {edge_length} long")]
    #[diagnostic(
        code(dieline::net::tab_overlap),
        help("use shallower tabs, a shallower fin or a wider hole")
    )]
    TabOverlap { edge_length: f64, tab_depth: f64 },

    #[error("cannot serialize the dieline as SVG: {message}")]
    #[diagnostic(code(dieline::net::svg))]
    Svg { message: String },
}
