//! Net assembly: fans the faces of a pyramid around its apex and joins
//! every edge with the right tab.
//!
//! The first face has its apex at the origin and its first ascendant edge
//! along +x; further faces fan clockwise. The flap closing the apex gap
//! sits counter-clockwise of the first face and carries the female holes,
//! while the male tabs run along the last face's free edge.

pub mod decoration;
pub mod polyhedra;
pub mod spec;

use std::f64::consts::TAU;

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{Group, Path as SvgPath, Svg, SvgNode, facet_xml};

use crate::defaults;
use crate::errors::{GeometryError, NetError};
use crate::geom::{hinged_plot, hinged_plot_by_projection_distance};
use crate::path::{PathData, fmt_num};
use crate::shapes::TabPaths;
use crate::shapes::ascendant_edge_tabs::{
    AscendantEdgeConnectionPaths, ascendant_edge_connection_tabs,
};
use crate::shapes::base_edge_tab::base_edge_connection_tab;
use crate::shapes::dash::stroke_dash_path;
use crate::shapes::generic::{RoundingDistance, rounded_edge_path};
use crate::types::{BBox, EPSILON, Point, Transform, pt};

use decoration::DecorationPattern;
use spec::NetSpec;

/// The final dieline: everything to cut through and everything to crease
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetPaths {
    pub cut: PathData,
    pub score: PathData,
}

impl NetPaths {
    /// Box over every end and control point of both paths
    pub fn bounding_box(&self) -> BBox {
        let mut bbox = self.cut.bounding_box();
        bbox.expand_bbox(&self.score.bounding_box());
        bbox
    }

    /// Moves the bounding box's min corner to the origin
    pub fn fit_to_origin_translation(&self) -> Transform {
        let bbox = self.bounding_box();
        if bbox.is_empty() {
            return Transform::IDENTITY;
        }
        Transform::translate(-bbox.min)
    }

    pub fn transformed(&self, t: Transform) -> NetPaths {
        NetPaths {
            cut: self.cut.transformed(t),
            score: self.score.transformed(t),
        }
    }

    /// A standalone SVG document, moved to the origin with `margin` all round.
    ///
    /// Scores are drawn under cuts.
    pub fn to_svg(&self, margin: f64) -> Result<String, NetError> {
        let fitted = self.transformed(self.fit_to_origin_translation());
        let view_box = fitted.bounding_box().padded(margin).view_box();
        let line = |class: &str, stroke: &str, path: &PathData| {
            SvgNode::G(Group {
                class: Some(class.to_string()),
                children: vec![SvgNode::Path(SvgPath {
                    d: Some(path.to_d()),
                    fill: Some("none".to_string()),
                    stroke: Some(stroke.to_string()),
                    stroke_width: Some(fmt_num(defaults::DIE_LINE_STROKE_WIDTH)),
                    ..Default::default()
                })],
                ..Default::default()
            })
        };
        let svg = Svg {
            view_box: Some(view_box),
            children: vec![
                line("score", defaults::SCORE_STROKE, &fitted.score),
                line("cut", defaults::CUT_STROKE, &fitted.cut),
            ],
            ..Default::default()
        };

        fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
            write!(writer, "{}", fmt_num(value))
        }
        let options = SerializeOptions {
            float_formatter: Some(format_float),
            ..Default::default()
        };
        facet_xml::to_string_with_options(&svg, &options).map_err(|e| NetError::Svg {
            message: e.to_string(),
        })
    }
}

/// The pieces of a net before they are merged into one cut and one score
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetParts {
    /// Radial points bounding each face, `faces + 1` of them
    pub fenceposts: Vec<Point>,
    /// Creases between neighbouring faces
    pub inter_face_scores: PathData,
    /// Outline of the flap closing the apex gap
    pub flap: PathData,
    /// One tab per base edge, in face order
    pub base_tabs: Vec<TabPaths>,
    /// Male side already rotated onto the last face's free edge
    pub ascendant_tabs: AscendantEdgeConnectionPaths,
    /// Decoration cut-outs tiled over every face
    pub decorations: PathData,
}

impl From<NetParts> for NetPaths {
    fn from(parts: NetParts) -> Self {
        let mut cut = PathData::new();
        let mut score = PathData::new();

        cut.concat_path(&parts.flap);
        score.concat_path(&parts.inter_face_scores);
        for tab in &parts.base_tabs {
            cut.concat_path(&tab.cut);
            score.concat_path(&tab.score);
        }
        let AscendantEdgeConnectionPaths { male, female } = &parts.ascendant_tabs;
        cut.concat_path(&male.cut).concat_path(&female.cut);
        score.concat_path(&male.score).concat_path(&female.score);
        cut.concat_path(&parts.decorations);

        NetPaths { cut, score }
    }
}

/// The remaining angle at the apex once `face_count` faces are fanned.
///
/// Fails when the faces overlap themselves, or close all the way round and
/// leave the flap nowhere to go.
pub fn apex_gap(apex_angle: f64, face_count: u32) -> Result<f64, GeometryError> {
    let gap = TAU - apex_angle * f64::from(face_count);
    if gap.abs() <= EPSILON {
        return Err(GeometryError::NoApexGap { face_count });
    }
    if gap < 0.0 {
        return Err(GeometryError::TooManyFaces {
            face_count,
            apex_angle_degrees: apex_angle.to_degrees(),
        });
    }
    Ok(gap)
}

/// Opening angle of the flap at the apex.
///
/// The flap keeps a margin clear of the last face and is never wider than
/// one face. Gaps narrower than the margin get a flap half their width.
pub fn flap_apex_angle(gap: f64, apex_angle: f64) -> f64 {
    let available = gap - defaults::FLAP_APEX_IMPINGE_MARGIN;
    if available > 0.0 {
        available.min(apex_angle)
    } else {
        crate::log::warn!(gap, "apex gap is narrower than the flap margin, halving it");
        gap / 2.0
    }
}

/// Radial points around the apex, alternating between the two ascendant
/// edge lengths.
pub fn fenceposts(spec: &NetSpec, face_count: u32) -> Result<Vec<Point>, GeometryError> {
    let [apex, first_corner, _] = spec.face_boundary_points()?;
    let [first, second, _] = spec.actual_face_edge_lengths();
    let apex_angle = spec.face_interior_angles()?[2];
    Ok((0..=face_count)
        .map(|i| {
            let length = if i % 2 == 1 { second } else { first };
            hinged_plot(apex, first_corner, -f64::from(i) * apex_angle, length)
        })
        .collect())
}

/// Transforms taking the first face onto each face of the net.
///
/// Asymmetric faces alternate handedness, so odd faces are mirrored across
/// their own first edge.
pub fn face_decoration_transforms(spec: &NetSpec) -> Result<Vec<Transform>, NetError> {
    let face_count = spec.faces_per_net()?;
    let apex_angle = spec.face_interior_angles()?[2];
    let mirror_odd = !spec.pyramid.face_is_symmetrical();
    Ok((0..face_count)
        .map(|i| {
            let rotation = Transform::rotate(-f64::from(i) * apex_angle);
            if mirror_odd && i % 2 == 1 {
                rotation * Transform::scale(1.0, -1.0) * Transform::rotate(apex_angle)
            } else {
                rotation
            }
        })
        .collect())
}

/// Build every part of the net described by `spec`
pub fn assemble_parts(spec: &NetSpec) -> Result<NetParts, NetError> {
    let face_count = spec.faces_per_net()?;
    let angles = spec.face_interior_angles()?;
    let apex_angle = angles[2];
    let [apex, first_corner, _] = spec.face_boundary_points()?;
    let ascendant_edge_tab_depth = spec.ascendant_edge_tab_depth();

    let gap = apex_gap(apex_angle, face_count)?;
    let flap_apex = flap_apex_angle(gap, apex_angle);
    crate::log::debug!(
        ?angles,
        face_count,
        gap,
        flap_apex,
        "resolved net angles"
    );

    let fenceposts = fenceposts(spec, face_count)?;

    let mut inter_face_scores = PathData::new();
    if let Some((_, interior)) = fenceposts.split_first() {
        for fencepost in interior.iter().take(interior.len().saturating_sub(1)) {
            inter_face_scores.concat_path(&stroke_dash_path(
                apex,
                *fencepost,
                &spec.inter_face_score,
            )?);
        }
    }

    let outer_apex_side = hinged_plot_by_projection_distance(
        apex,
        first_corner,
        flap_apex,
        ascendant_edge_tab_depth,
    )?;
    let outer_base_side = hinged_plot_by_projection_distance(
        first_corner,
        apex,
        -defaults::FLAP_BASE_ANGLE,
        -ascendant_edge_tab_depth,
    )?;
    let max_rounding = apex
        .distance(outer_apex_side)
        .min(first_corner.distance(outer_base_side));
    let flap = rounded_edge_path(
        &[apex, outer_apex_side, outer_base_side, first_corner],
        RoundingDistance::Absolute(
            spec.ascendant_edge_tabs.flap_rounding_distance_ratio * max_rounding,
        ),
    )?;

    let base_tabs = fenceposts
        .windows(2)
        .map(|edge| {
            base_edge_connection_tab(
                edge[0],
                edge[1],
                ascendant_edge_tab_depth,
                &spec.base_edge_tab,
                &spec.base_score,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let tab_intervals = spec.tab_interval_ratios()?;
    let gap_intervals = spec.tab_gap_interval_ratios()?;
    let tabs = ascendant_edge_connection_tabs(
        first_corner,
        apex,
        &spec.ascendant_edge_tabs,
        &spec.inter_face_score,
        &tab_intervals,
        &gap_intervals,
    )?;
    let fan_rotation = Transform::rotate(-f64::from(face_count) * apex_angle);
    let ascendant_tabs = AscendantEdgeConnectionPaths {
        male: tabs.male.transformed(fan_rotation),
        female: tabs.female,
    };

    let mut decorations = PathData::new();
    if let (Some(decoration), Some(placement)) =
        (&spec.decoration, spec.decoration_transform()?)
    {
        if let Some(pattern_cut) = decoration.pattern.cut_path() {
            for face in face_decoration_transforms(spec)? {
                decorations.concat_path(&pattern_cut.transformed(face * placement));
            }
        } else {
            crate::log::trace!(
                kind = decoration.pattern.kind(),
                "decoration has no cut geometry"
            );
        }
    }

    crate::log::debug!(
        base_tabs = base_tabs.len(),
        decoration_commands = decorations.len(),
        "assembled net parts"
    );
    Ok(NetParts {
        fenceposts,
        inter_face_scores,
        flap,
        base_tabs,
        ascendant_tabs,
        decorations,
    })
}

/// The full dieline for `spec`
pub fn make_paths(spec: &NetSpec) -> Result<NetPaths, NetError> {
    Ok(assemble_parts(spec)?.into())
}

/// Tabs for a material test cut, laid out on straight edges
#[derive(Clone, Debug, PartialEq)]
pub struct TestTabs {
    /// Male and female sides along a copy of the first ascendant edge
    pub ascendant: AscendantEdgeConnectionPaths,
    /// One tab along a copy of the base edge
    pub base: TabPaths,
}

impl TestTabs {
    /// Stack female, male and base tabs top to bottom so they do not overlap
    pub fn stacked(&self) -> NetPaths {
        let mut stacked = NetPaths::default();
        let mut y = 0.0;
        for tab in [&self.ascendant.female, &self.ascendant.male, &self.base] {
            let bbox = tab.bounding_box();
            if bbox.is_empty() {
                continue;
            }
            y -= bbox.min.y;
            let placed = tab.transformed(Transform::translate(pt(0.0, y)));
            stacked.cut.concat_path(&placed.cut);
            stacked.score.concat_path(&placed.score);
            y += bbox.max.y;
        }
        stacked
    }
}

/// Test tabs sized like the ones on the net for `spec`
pub fn test_tabs(spec: &NetSpec) -> Result<TestTabs, NetError> {
    let [first, _, base] = spec.actual_face_edge_lengths();
    let origin = pt(0.0, 0.0);
    let ascendant = ascendant_edge_connection_tabs(
        origin,
        pt(first, 0.0),
        &spec.ascendant_edge_tabs,
        &spec.inter_face_score,
        &spec.tab_interval_ratios()?,
        &spec.tab_gap_interval_ratios()?,
    )?;
    let base = base_edge_connection_tab(
        origin,
        pt(base, 0.0),
        spec.ascendant_edge_tab_depth(),
        &spec.base_edge_tab,
        &spec.base_score,
    )?;
    Ok(TestTabs { ascendant, base })
}
