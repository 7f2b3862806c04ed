//! Value types shared by every module: points, bounding boxes, transforms.

use std::fmt;
use std::ops::Mul;

use glam::{DAffine2, DMat2, DVec2, dvec2};

/// A 2D point. Plain value; equality is exact, use [`approx_eq`] for tolerance.
pub type Point = DVec2;

/// Tolerance used for "is this zero" decisions in the geometry core
pub const EPSILON: f64 = 1e-9;

/// Build a point (short form used throughout the shape builders)
#[inline]
pub fn pt(x: f64, y: f64) -> Point {
    dvec2(x, y)
}

/// Value equality of two points within `EPSILON`
pub fn approx_eq(a: Point, b: Point) -> bool {
    a.distance(b) < EPSILON * a.length().max(b.length()).max(1.0)
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: dvec2(f64::MAX, f64::MAX),
            max: dvec2(f64::MIN, f64::MIN),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Expand to include another box
    pub fn expand_bbox(&mut self, other: &BBox) {
        if !other.is_empty() {
            self.expand_point(other.min);
            self.expand_point(other.max);
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        (self.min + self.max) * 0.5
    }

    /// Grow the box by `padding` on every side
    pub fn padded(&self, padding: f64) -> BBox {
        BBox {
            min: self.min - DVec2::splat(padding),
            max: self.max + DVec2::splat(padding),
        }
    }

    /// `viewBox` attribute value for this box
    pub fn view_box(&self) -> String {
        format!(
            "{} {} {} {}",
            self.min.x,
            self.min.y,
            self.width(),
            self.height()
        )
    }
}

impl FromIterator<Point> for BBox {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut bbox = BBox::new();
        for p in iter {
            bbox.expand_point(p);
        }
        bbox
    }
}

/// An owned 2D affine transform.
///
/// Composition follows the SVG transform-list convention: in `a * b`, `b` is
/// applied to the point first. [`Transform::then`] reads left to right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform(DAffine2);

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform(DAffine2::IDENTITY);

    /// From the six SVG `matrix(a b c d e f)` coefficients
    pub fn from_matrix(m: [f64; 6]) -> Self {
        Transform(DAffine2::from_cols_array(&m))
    }

    /// Counter-clockwise rotation in radians (math orientation)
    pub fn rotate(radians: f64) -> Self {
        Transform(DAffine2::from_angle(radians))
    }

    /// Rotation in degrees, as written in an SVG `rotate()`
    pub fn rotate_degrees(degrees: f64) -> Self {
        Self::rotate(degrees.to_radians())
    }

    /// Rotation about an arbitrary centre
    pub fn rotate_about(radians: f64, center: Point) -> Self {
        Self::translate(center) * Self::rotate(radians) * Self::translate(-center)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Transform(DAffine2::from_scale(dvec2(sx, sy)))
    }

    pub fn translate(offset: Point) -> Self {
        Transform(DAffine2::from_translation(offset))
    }

    pub fn skew_x(radians: f64) -> Self {
        Transform(DAffine2::from_mat2(DMat2::from_cols(
            dvec2(1.0, 0.0),
            dvec2(radians.tan(), 1.0),
        )))
    }

    pub fn skew_y(radians: f64) -> Self {
        Transform(DAffine2::from_mat2(DMat2::from_cols(
            dvec2(1.0, radians.tan()),
            dvec2(0.0, 1.0),
        )))
    }

    /// Apply `self`, then `next`
    pub fn then(self, next: Transform) -> Transform {
        next * self
    }

    /// Conjugate by a translation so the transform acts around `origin`
    /// instead of around (0, 0).
    pub fn with_origin(self, origin: Point) -> Transform {
        Self::translate(origin) * self * Self::translate(-origin)
    }

    /// `None` when the matrix is singular
    pub fn inverse(self) -> Option<Transform> {
        let det = self.determinant();
        if det.abs() < EPSILON || !det.is_finite() {
            None
        } else {
            Some(Transform(self.0.inverse()))
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        self.0.transform_point2(p)
    }

    /// Apply the linear part only (for direction vectors)
    pub fn apply_vector(&self, v: Point) -> Point {
        self.0.transform_vector2(v)
    }

    pub fn determinant(&self) -> f64 {
        self.0.matrix2.determinant()
    }

    /// Whether the transform flips orientation
    pub fn is_mirroring(&self) -> bool {
        self.determinant() < 0.0
    }

    /// Rotation of the x axis, in radians
    pub fn rotation_angle(&self) -> f64 {
        let x_axis = self.0.matrix2.x_axis;
        x_axis.y.atan2(x_axis.x)
    }

    /// The SVG `matrix(a b c d e f)` coefficients
    pub fn to_matrix(&self) -> [f64; 6] {
        self.0.to_cols_array()
    }

    pub fn is_identity(&self) -> bool {
        self.to_matrix()
            .iter()
            .zip(Self::IDENTITY.to_matrix())
            .all(|(a, b)| (a - b).abs() < EPSILON)
    }
}

impl Mul for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Transform {
        Transform(self.0 * rhs.0)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.to_matrix();
        write!(f, "matrix({} {} {} {} {} {})", a, b, c, d, e, g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            actual.distance(expected) < 1e-10,
            "point mismatch: {} != {}",
            actual,
            expected
        );
    }

    // ==================== BBox tests ====================

    #[test]
    fn bbox_new_is_empty() {
        assert!(BBox::new().is_empty());
    }

    #[test]
    fn bbox_from_points() {
        let bb: BBox = [pt(1.0, 2.0), pt(5.0, -2.0), pt(3.0, 8.0)]
            .into_iter()
            .collect();
        assert!(!bb.is_empty());
        assert_eq!(bb.min, pt(1.0, -2.0));
        assert_eq!(bb.max, pt(5.0, 8.0));
        assert_eq!(bb.width(), 4.0);
        assert_eq!(bb.height(), 10.0);
        assert_eq!(bb.center(), pt(3.0, 3.0));
    }

    #[test]
    fn bbox_padded_and_view_box() {
        let bb: BBox = [pt(0.0, 0.0), pt(4.0, 2.0)].into_iter().collect();
        assert_eq!(bb.padded(1.0).view_box(), "-1 -1 6 4");
    }

    // ==================== Transform tests ====================

    #[test]
    fn rotate_quarter_turn() {
        let t = Transform::rotate(FRAC_PI_2);
        assert_point_eq(t.apply(pt(1.0, 0.0)), pt(0.0, 1.0));
    }

    #[test]
    fn composition_applies_right_operand_first() {
        let scale = Transform::scale(2.0, 1.0);
        let shift = Transform::translate(pt(1.0, 0.0));
        // translate(1,0) scale(2,1): scale first
        assert_point_eq((shift * scale).apply(pt(1.0, 1.0)), pt(3.0, 1.0));
        assert_point_eq(scale.then(shift).apply(pt(1.0, 1.0)), pt(3.0, 1.0));
    }

    #[test]
    fn inverse_round_trips() {
        let t = Transform::rotate(0.3) * Transform::scale(-1.0, 2.0);
        let inv = t.inverse().unwrap();
        let p = pt(3.5, -1.25);
        assert_point_eq(inv.apply(t.apply(p)), p);
        assert!((t * inv).is_identity());
    }

    #[test]
    fn singular_has_no_inverse() {
        assert!(Transform::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn with_origin_keeps_origin_fixed() {
        let origin = pt(5.0, 5.0);
        let t = Transform::scale(-1.0, 1.0).with_origin(origin);
        assert_point_eq(t.apply(origin), origin);
        assert_point_eq(t.apply(pt(6.0, 5.0)), pt(4.0, 5.0));
        assert!(t.is_mirroring());
    }

    #[test]
    fn matrix_coefficients_round_trip() {
        let m = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(Transform::from_matrix(m).to_matrix(), m);
        assert_eq!(
            Transform::from_matrix(m).to_string(),
            "matrix(1 2 3 4 5 6)"
        );
    }

    #[test]
    fn rotation_angle_reads_back() {
        assert!((Transform::rotate(0.7).rotation_angle() - 0.7).abs() < 1e-12);
    }
}
