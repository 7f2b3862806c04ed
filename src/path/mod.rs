//! Path data: an ordered command list that serializes to an SVG `d` string.
//!
//! Commands are stored with absolute co-ordinates. Every builder method
//! checks its points are finite, so a constructed [`PathData`] always
//! serializes into a well-formed path string.

mod parse;

use std::fmt;
use std::ops::RangeBounds;
use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::PathError;
use crate::types::{BBox, EPSILON, Point, Transform};

pub use parse::parse_transform;

/// One drawing instruction
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    Move(Point),
    Line(Point),
    CubicBezier {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    QuadraticBezier {
        ctrl: Point,
        to: Point,
    },
    /// Control point is the reflection of the previous quadratic's
    SmoothQuadraticBezier(Point),
    EllipticalArc {
        to: Point,
        radius: DVec2,
        /// Degrees, as in SVG
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
    },
    Close,
}

impl PathCommand {
    /// The SVG command letter (absolute form)
    pub fn code(&self) -> char {
        match self {
            PathCommand::Move(_) => 'M',
            PathCommand::Line(_) => 'L',
            PathCommand::CubicBezier { .. } => 'C',
            PathCommand::QuadraticBezier { .. } => 'Q',
            PathCommand::SmoothQuadraticBezier(_) => 'T',
            PathCommand::EllipticalArc { .. } => 'A',
            PathCommand::Close => 'Z',
        }
    }

    /// Where the pen ends up, `None` for `Close`
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathCommand::Move(to)
            | PathCommand::Line(to)
            | PathCommand::SmoothQuadraticBezier(to)
            | PathCommand::CubicBezier { to, .. }
            | PathCommand::QuadraticBezier { to, .. }
            | PathCommand::EllipticalArc { to, .. } => Some(to),
            PathCommand::Close => None,
        }
    }

    /// Control and end points, in serialization order
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let points: [Option<Point>; 3] = match *self {
            PathCommand::Move(to)
            | PathCommand::Line(to)
            | PathCommand::SmoothQuadraticBezier(to)
            | PathCommand::EllipticalArc { to, .. } => [Some(to), None, None],
            PathCommand::CubicBezier { ctrl1, ctrl2, to } => [Some(ctrl1), Some(ctrl2), Some(to)],
            PathCommand::QuadraticBezier { ctrl, to } => [Some(ctrl), Some(to), None],
            PathCommand::Close => [None, None, None],
        };
        points.into_iter().flatten()
    }

    /// Map every co-ordinate through `t`.
    ///
    /// Arcs are exact under similarity transforms (rotation, uniform scale,
    /// mirroring, translation). Under shear or non-uniform scale the radii
    /// are scaled by the area factor only.
    pub fn transformed(&self, t: &Transform) -> PathCommand {
        match *self {
            PathCommand::Move(to) => PathCommand::Move(t.apply(to)),
            PathCommand::Line(to) => PathCommand::Line(t.apply(to)),
            PathCommand::CubicBezier { ctrl1, ctrl2, to } => PathCommand::CubicBezier {
                ctrl1: t.apply(ctrl1),
                ctrl2: t.apply(ctrl2),
                to: t.apply(to),
            },
            PathCommand::QuadraticBezier { ctrl, to } => PathCommand::QuadraticBezier {
                ctrl: t.apply(ctrl),
                to: t.apply(to),
            },
            PathCommand::SmoothQuadraticBezier(to) => {
                PathCommand::SmoothQuadraticBezier(t.apply(to))
            }
            PathCommand::EllipticalArc {
                to,
                radius,
                x_axis_rotation,
                large_arc,
                sweep,
            } => {
                let mirroring = t.is_mirroring();
                let rotation = t.rotation_angle().to_degrees();
                PathCommand::EllipticalArc {
                    to: t.apply(to),
                    radius: radius * t.determinant().abs().sqrt(),
                    x_axis_rotation: if mirroring {
                        rotation - x_axis_rotation
                    } else {
                        rotation + x_axis_rotation
                    },
                    large_arc,
                    sweep: sweep != mirroring,
                }
            }
            PathCommand::Close => PathCommand::Close,
        }
    }

    fn check_finite(&self) -> Result<(), PathError> {
        if let PathCommand::EllipticalArc {
            radius,
            x_axis_rotation,
            ..
        } = self
        {
            check_point(*radius)?;
            if !x_axis_rotation.is_finite() {
                return Err(PathError::MalformedPoint {
                    x: *x_axis_rotation,
                    y: 0.0,
                });
            }
        }
        self.points().try_for_each(check_point)
    }
}

fn check_point(p: Point) -> Result<(), PathError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(PathError::MalformedPoint { x: p.x, y: p.y })
    }
}

/// Format a number with 10 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    if value.abs() < EPSILON {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(9 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (9 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn fmt_point(p: Point) -> String {
    format!("{},{}", fmt_num(p.x), fmt_num(p.y))
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathCommand::Move(to) => write!(f, "M {}", fmt_point(to)),
            PathCommand::Line(to) => write!(f, "L {}", fmt_point(to)),
            PathCommand::CubicBezier { ctrl1, ctrl2, to } => write!(
                f,
                "C {} {} {}",
                fmt_point(ctrl1),
                fmt_point(ctrl2),
                fmt_point(to)
            ),
            PathCommand::QuadraticBezier { ctrl, to } => {
                write!(f, "Q {} {}", fmt_point(ctrl), fmt_point(to))
            }
            PathCommand::SmoothQuadraticBezier(to) => write!(f, "T {}", fmt_point(to)),
            PathCommand::EllipticalArc {
                to,
                radius,
                x_axis_rotation,
                large_arc,
                sweep,
            } => write!(
                f,
                "A {} {} {} {} {}",
                fmt_point(radius),
                fmt_num(x_axis_rotation),
                u8::from(large_arc),
                u8::from(sweep),
                fmt_point(to)
            ),
            PathCommand::Close => write!(f, "Z"),
        }
    }
}

/// An ordered list of path commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Append a command after checking that all of its numbers are finite
    pub fn push(&mut self, command: PathCommand) -> Result<&mut Self, PathError> {
        command.check_finite()?;
        self.commands.push(command);
        Ok(self)
    }

    pub fn move_to(&mut self, to: Point) -> Result<&mut Self, PathError> {
        self.push(PathCommand::Move(to))
    }

    pub fn line_to(&mut self, to: Point) -> Result<&mut Self, PathError> {
        self.push(PathCommand::Line(to))
    }

    pub fn cubic_bezier(
        &mut self,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    ) -> Result<&mut Self, PathError> {
        self.push(PathCommand::CubicBezier { ctrl1, ctrl2, to })
    }

    pub fn quadratic_bezier(&mut self, ctrl: Point, to: Point) -> Result<&mut Self, PathError> {
        self.push(PathCommand::QuadraticBezier { ctrl, to })
    }

    pub fn smooth_quadratic_bezier(&mut self, to: Point) -> Result<&mut Self, PathError> {
        self.push(PathCommand::SmoothQuadraticBezier(to))
    }

    pub fn elliptical_arc(
        &mut self,
        to: Point,
        radius_x: f64,
        radius_y: f64,
        sweep: bool,
        large_arc: bool,
        x_axis_rotation: f64,
    ) -> Result<&mut Self, PathError> {
        self.push(PathCommand::EllipticalArc {
            to,
            radius: dvec2(radius_x, radius_y),
            x_axis_rotation,
            large_arc,
            sweep,
        })
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Append a copy of every command of `other`
    pub fn concat_path(&mut self, other: &PathData) -> &mut Self {
        self.commands.extend_from_slice(&other.commands);
        self
    }

    /// Bake `t` into the stored co-ordinates
    pub fn transform(&mut self, t: Transform) -> &mut Self {
        for command in &mut self.commands {
            *command = command.transformed(&t);
        }
        self
    }

    /// A transformed copy; `self` is left untouched
    pub fn transformed(&self, t: Transform) -> PathData {
        let mut copy = self.clone();
        copy.transform(t);
        copy
    }

    /// Copy a sub-range of commands.
    ///
    /// Nothing re-establishes the current point: a slice that does not start
    /// with a move draws from wherever the path it is appended to left off.
    /// Use [`PathData::anchored_at`] when that is not intended.
    pub fn slice_without_continuity(&self, range: impl RangeBounds<usize>) -> PathData {
        let start = match range.start_bound() {
            std::ops::Bound::Included(&i) => i,
            std::ops::Bound::Excluded(&i) => i + 1,
            std::ops::Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            std::ops::Bound::Included(&i) => i + 1,
            std::ops::Bound::Excluded(&i) => i,
            std::ops::Bound::Unbounded => self.commands.len(),
        };
        let end = end.min(self.commands.len());
        let start = start.min(end);
        PathData {
            commands: self.commands[start..end].to_vec(),
        }
    }

    /// Prefix a move to `at` unless the path already starts with one
    pub fn anchored_at(mut self, at: Point) -> Result<PathData, PathError> {
        if !matches!(self.commands.first(), Some(PathCommand::Move(_))) {
            check_point(at)?;
            self.commands.insert(0, PathCommand::Move(at));
        }
        Ok(self)
    }

    /// The pen position after the last command, following `Close` back to
    /// the start of its subpath.
    pub fn current_point(&self) -> Option<Point> {
        let mut current = None;
        let mut subpath_start = None;
        for command in &self.commands {
            match command {
                PathCommand::Move(to) => {
                    current = Some(*to);
                    subpath_start = Some(*to);
                }
                PathCommand::Close => current = subpath_start,
                other => current = other.end_point(),
            }
        }
        current
    }

    /// Every control and end point, in command order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().flat_map(PathCommand::points)
    }

    /// Bounds of all control and end points.
    ///
    /// Bezier control points hull their curve, so this is a conservative box;
    /// arcs contribute their end points only.
    pub fn bounding_box(&self) -> BBox {
        self.points().collect()
    }

    /// The SVG `d` attribute string
    pub fn to_d(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

impl FromStr for PathData {
    type Err = PathError;

    fn from_str(d: &str) -> Result<Self, Self::Err> {
        PathData::from_d(d)
    }
}
