//! Net parameters and the face geometry derived from them.

use crate::defaults;
use crate::errors::{GeometryError, NetError};
use crate::geom::{hinged_plot, inset_points, triangle_angles_given_sides};
use crate::range::RatioRange;
use crate::shapes::ascendant_edge_tabs::AscendantEdgeTabsSpec;
use crate::shapes::base_edge_tab::BaseEdgeTabSpec;
use crate::shapes::dash::DashPatternSpec;
use crate::types::{Point, Transform, pt};

use super::decoration::{DecorationPattern, PlacedDecoration};
use super::polyhedra::{GREAT_STELLATED_DODECAHEDRON, PyramidGeometry, polyhedron};

/// Everything needed to draw one net.
///
/// Owned by the caller and read fresh on every assembly.
#[derive(Clone, Debug, PartialEq)]
pub struct NetSpec {
    pub shape_name: String,
    pub pyramid: PyramidGeometry,
    /// How many nets share the faces of one pyramid
    pub nets_per_pyramid: u32,
    /// Diameter of the finished shape, in output units
    pub shape_height: f64,
    pub ascendant_edge_tabs: AscendantEdgeTabsSpec,
    pub base_edge_tab: BaseEdgeTabSpec,
    pub inter_face_score: DashPatternSpec,
    pub base_score: DashPatternSpec,
    pub decoration: Option<PlacedDecoration>,
    /// Margin kept clear between the face edges and the decoration
    pub decoration_border_inset: f64,
}

impl Default for NetSpec {
    fn default() -> Self {
        NetSpec::with_pyramid(defaults::DEFAULT_POLYHEDRON, GREAT_STELLATED_DODECAHEDRON)
    }
}

impl NetSpec {
    pub fn with_pyramid(shape_name: impl Into<String>, pyramid: PyramidGeometry) -> Self {
        NetSpec {
            shape_name: shape_name.into(),
            pyramid,
            nets_per_pyramid: 1,
            shape_height: defaults::SHAPE_HEIGHT,
            ascendant_edge_tabs: AscendantEdgeTabsSpec::default(),
            base_edge_tab: BaseEdgeTabSpec::default(),
            inter_face_score: DashPatternSpec::inter_face_score(),
            base_score: DashPatternSpec::tab_score(),
            decoration: None,
            decoration_border_inset: defaults::DECORATION_BORDER_INSET,
        }
    }

    /// Default parameters for a named polyhedron
    pub fn for_polyhedron(name: &str) -> Result<Self, NetError> {
        Ok(NetSpec::with_pyramid(name, polyhedron(name)?))
    }

    /// Output units per relative edge unit
    pub fn face_scale(&self) -> f64 {
        self.shape_height / self.pyramid.diameter
    }

    pub fn actual_face_edge_lengths(&self) -> [f64; 3] {
        let scale = self.face_scale();
        self.pyramid.relative_face_edge_lengths.map(|len| len * scale)
    }

    /// Angles opposite each edge; index 2 is the angle at the apex
    pub fn face_interior_angles(&self) -> Result<[f64; 3], GeometryError> {
        triangle_angles_given_sides(self.pyramid.relative_face_edge_lengths)
    }

    /// The first face with its apex at the origin and its first ascendant
    /// edge along +x: `[apex, first base corner, second base corner]`.
    pub fn face_boundary_points(&self) -> Result<[Point; 3], GeometryError> {
        let [first, second, _] = self.actual_face_edge_lengths();
        let apex_angle = self.face_interior_angles()?[2];
        let apex = pt(0.0, 0.0);
        let first_corner = pt(first, 0.0);
        Ok([
            apex,
            first_corner,
            hinged_plot(apex, first_corner, -apex_angle, second),
        ])
    }

    pub fn ascendant_edge_tab_depth(&self) -> f64 {
        self.ascendant_edge_tabs
            .tab_depth(self.actual_face_edge_lengths()[0])
    }

    pub fn tab_interval_ratios(&self) -> Result<Vec<RatioRange>, NetError> {
        self.ascendant_edge_tabs.tab_interval_ratios()
    }

    pub fn tab_gap_interval_ratios(&self) -> Result<Vec<RatioRange>, NetError> {
        self.ascendant_edge_tabs.tab_gap_interval_ratios()
    }

    pub fn faces_per_net(&self) -> Result<u32, NetError> {
        self.pyramid.faces_per_net(self.nets_per_pyramid)
    }

    pub fn copies_needed(&self) -> u32 {
        self.pyramid.copies_needed(self.nets_per_pyramid)
    }

    /// The face outline pulled in by the border inset
    pub fn decoration_boundary_points(&self) -> Result<Vec<Point>, GeometryError> {
        inset_points(&self.face_boundary_points()?, self.decoration_border_inset)
    }

    /// Shrinks the face about its incenter so every edge moves in by the
    /// border inset.
    pub fn border_inset_transform(&self) -> Result<Transform, GeometryError> {
        let [apex, first_corner, second_corner] = self.face_boundary_points()?;
        let [first, second, base] = self.actual_face_edge_lengths();
        let perimeter = first + second + base;
        // each vertex weighted by the length of the side opposite it
        let incenter = (apex * base + first_corner * second + second_corner * first) / perimeter;
        let area = (first_corner - apex).perp_dot(second_corner - apex).abs() / 2.0;
        let inradius = 2.0 * area / perimeter;
        if self.decoration_border_inset >= inradius {
            return Err(GeometryError::DegenerateInset {
                distance: self.decoration_border_inset,
            });
        }
        let factor = (inradius - self.decoration_border_inset) / inradius;
        Ok(Transform::scale(factor, factor).with_origin(incenter))
    }

    /// Relative face units to output units
    pub fn path_scale_transform(&self) -> Transform {
        let scale = self.face_scale();
        Transform::scale(scale, scale)
    }

    /// Where the decoration lands on the first face, if there is one
    pub fn decoration_transform(&self) -> Result<Option<Transform>, GeometryError> {
        let Some(decoration) = &self.decoration else {
            return Ok(None);
        };
        Ok(Some(
            self.border_inset_transform()? * self.path_scale_transform() * decoration.transform,
        ))
    }

    /// Base name for exported files, e.g. `octahedron__stars.svg`
    pub fn file_basename(&self) -> String {
        let source = self
            .decoration
            .as_ref()
            .and_then(|d| d.pattern.source_file_name())
            .unwrap_or("undecorated");
        let shape = if self.shape_name.is_empty() {
            "shape"
        } else {
            &self.shape_name
        };
        format!("{shape}__{source}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::decoration::{PathPattern, RawPattern};
    use crate::types::approx_eq;

    fn octahedron() -> NetSpec {
        NetSpec::for_polyhedron("octahedron").unwrap()
    }

    #[test]
    fn default_is_the_great_stellated_dodecahedron() {
        let spec = NetSpec::default();
        assert_eq!(spec.shape_name, "great-stellated-dodecahedron");
        assert_eq!(spec.pyramid, polyhedron("great-stellated-dodecahedron").unwrap());
        assert_eq!(spec.faces_per_net().unwrap(), 3);
        assert_eq!(spec.copies_needed(), 20);
    }

    #[test]
    fn boundary_points_match_edge_lengths() {
        let spec = NetSpec::for_polyhedron("kis-rhombic-dodecahedron").unwrap();
        let [apex, first_corner, second_corner] = spec.face_boundary_points().unwrap();
        let [first, second, base] = spec.actual_face_edge_lengths();
        assert!((apex.distance(first_corner) - first).abs() < 1e-9);
        assert!((apex.distance(second_corner) - second).abs() < 1e-9);
        assert!((first_corner.distance(second_corner) - base).abs() < 1e-9);
        // faces fan clockwise from +x
        assert!(second_corner.y < 0.0);
    }

    #[test]
    fn equilateral_face_scale() {
        let spec = octahedron();
        let expected = defaults::SHAPE_HEIGHT / std::f64::consts::SQRT_2;
        assert!((spec.face_scale() - expected).abs() < 1e-12);
        let angles = spec.face_interior_angles().unwrap();
        assert!((angles[2] - std::f64::consts::FRAC_PI_3).abs() < 1e-9);
        assert!(
            (spec.ascendant_edge_tab_depth()
                - expected * defaults::TAB_DEPTH_TO_TRAVERSAL_LENGTH)
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn border_inset_agrees_with_polygon_inset() {
        let spec = NetSpec::for_polyhedron("triakis-octahedron").unwrap();
        let inset = spec.border_inset_transform().unwrap();
        let by_transform: Vec<Point> = spec
            .face_boundary_points()
            .unwrap()
            .iter()
            .map(|p| inset.apply(*p))
            .collect();
        let by_offset = spec.decoration_boundary_points().unwrap();
        for (a, b) in by_transform.iter().zip(&by_offset) {
            assert!(a.distance(*b) < 1e-9, "{a} != {b}");
        }
    }

    #[test]
    fn oversized_inset_is_degenerate() {
        let spec = NetSpec {
            decoration_border_inset: 1000.0,
            ..octahedron()
        };
        assert!(matches!(
            spec.border_inset_transform(),
            Err(GeometryError::DegenerateInset { .. })
        ));
    }

    #[test]
    fn decoration_transform_scales_before_inset() {
        let mut spec = octahedron();
        assert_eq!(spec.decoration_transform().unwrap(), None);
        spec.decoration = Some(PlacedDecoration::new(RawPattern { svg: String::new() }));
        let t = spec.decoration_transform().unwrap().unwrap();
        let apex_in_pattern = pt(0.0, 0.0);
        let expected = spec.border_inset_transform().unwrap().apply(apex_in_pattern);
        assert!(approx_eq(t.apply(apex_in_pattern), expected));
        let unit = t.apply(pt(1.0, 0.0)) - t.apply(apex_in_pattern);
        let inset_factor = spec.border_inset_transform().unwrap().to_matrix()[0];
        assert!((unit.length() - spec.face_scale() * inset_factor).abs() < 1e-9);
    }

    #[test]
    fn file_basename_names_the_artwork() {
        let mut spec = octahedron();
        assert_eq!(spec.file_basename(), "octahedron__undecorated");
        spec.decoration = Some(PlacedDecoration::new(
            PathPattern::from_d("M 0 0 L 1 0 L 0 1 Z", Some("stars.svg".into())).unwrap(),
        ));
        assert_eq!(spec.file_basename(), "octahedron__stars.svg");
        spec.shape_name.clear();
        assert_eq!(spec.file_basename(), "shape__stars.svg");
    }
}
