//! Parse SVG path data and transform lists with the pest grammar in
//! `path.pest`.

use glam::dvec2;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::{Pair, Pairs};
use pest_derive::Parser;

use super::{PathCommand, PathData};
use crate::errors::PathError;
use crate::types::{Point, Transform, pt};

#[derive(Parser)]
#[grammar = "path.pest"]
struct PathParser;

fn pest_error(source: &str, e: pest::error::Error<Rule>) -> PathError {
    let span = match e.location {
        InputLocation::Pos(p) => (p, 0),
        InputLocation::Span((start, end)) => (start, end - start),
    };
    PathError::parse(e.variant.message(), source, span)
}

fn span_of(pair: &Pair<Rule>) -> (usize, usize) {
    let span = pair.as_span();
    (span.start(), span.end() - span.start())
}

fn numbers(pairs: Pairs<Rule>, source: &str) -> Result<Vec<f64>, PathError> {
    pairs
        .filter(|p| p.as_rule() == Rule::number)
        .map(|p| {
            p.as_str()
                .parse::<f64>()
                .map_err(|e| PathError::parse(e.to_string(), source, span_of(&p)))
        })
        .collect()
}

impl PathData {
    /// Parse an SVG `d` attribute.
    ///
    /// Relative commands are resolved to absolute co-ordinates, `H`/`V`
    /// become lines and `S` becomes a cubic with its reflected control
    /// point, so `from_d(p.to_d())` reproduces `p`.
    pub fn from_d(d: &str) -> Result<PathData, PathError> {
        let pairs = PathParser::parse(Rule::path_data, d).map_err(|e| pest_error(d, e))?;

        let mut cursor = Cursor::default();
        for root in pairs {
            for pair in root.into_inner() {
                if pair.as_rule() == Rule::command {
                    cursor.command(pair, d)?;
                }
            }
        }
        Ok(cursor.path)
    }
}

/// Parse an SVG transform list such as `translate(10 5) rotate(30)`.
///
/// Functions compose as in SVG: the rightmost is applied first.
pub fn parse_transform(source: &str) -> Result<Transform, PathError> {
    let pairs =
        PathParser::parse(Rule::transform_list, source).map_err(|e| pest_error(source, e))?;

    let mut result = Transform::IDENTITY;
    for root in pairs {
        for pair in root.into_inner() {
            if pair.as_rule() == Rule::transform_fn {
                result = result * transform_fn(pair, source)?;
            }
        }
    }
    Ok(result)
}

fn transform_fn(pair: Pair<Rule>, source: &str) -> Result<Transform, PathError> {
    let span = span_of(&pair);
    let mut inner = pair.into_inner();
    let name = inner.next().map(|p| p.as_str()).unwrap_or_default();
    let args = numbers(inner, source)?;
    if args.iter().any(|v| !v.is_finite()) {
        return Err(PathError::parse("transform argument out of range", source, span));
    }

    let t = match (name, args.as_slice()) {
        ("matrix", &[a, b, c, d, e, f]) => Transform::from_matrix([a, b, c, d, e, f]),
        ("translate", &[tx]) => Transform::translate(pt(tx, 0.0)),
        ("translate", &[tx, ty]) => Transform::translate(pt(tx, ty)),
        ("scale", &[s]) => Transform::scale(s, s),
        ("scale", &[sx, sy]) => Transform::scale(sx, sy),
        ("rotate", &[a]) => Transform::rotate_degrees(a),
        ("rotate", &[a, cx, cy]) => Transform::rotate_about(a.to_radians(), pt(cx, cy)),
        ("skewX", &[a]) => Transform::skew_x(a.to_radians()),
        ("skewY", &[a]) => Transform::skew_y(a.to_radians()),
        _ => {
            return Err(PathError::parse(
                format!("wrong number of arguments for {}()", name),
                source,
                span,
            ));
        }
    };
    Ok(t)
}

/// Pen state while walking the commands of a `d` string
#[derive(Default)]
struct Cursor {
    path: PathData,
    current: Point,
    subpath_start: Point,
    /// Second control point of the previous C/S, for S reflection
    last_cubic_ctrl: Option<Point>,
    /// Control point of the previous Q/T, for T reflection
    last_quad_ctrl: Option<Point>,
}

impl Cursor {
    fn command(&mut self, pair: Pair<Rule>, source: &str) -> Result<(), PathError> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();
        let letter = inner
            .next()
            .and_then(|p| p.as_str().chars().next())
            .ok_or_else(|| PathError::parse("missing command letter", source, span))?;
        let args = numbers(inner, source)?;

        let relative = letter.is_ascii_lowercase();
        let code = letter.to_ascii_uppercase();

        if self.path.is_empty() && code != 'M' {
            return Err(PathError::MissingMove {
                src: miette::NamedSource::new("<path>", source.to_string()),
                span: span.into(),
            });
        }

        let arity = match code {
            'H' | 'V' => 1,
            'M' | 'L' | 'T' => 2,
            'S' | 'Q' => 4,
            'C' => 6,
            'A' => 7,
            _ => 0,
        };

        if arity == 0 {
            if !args.is_empty() {
                return Err(argument_count(letter, 0, args.len(), source, span));
            }
            self.path.close();
            self.current = self.subpath_start;
            self.last_cubic_ctrl = None;
            self.last_quad_ctrl = None;
            return Ok(());
        }

        if args.is_empty() || args.len() % arity != 0 {
            return Err(argument_count(letter, arity, args.len(), source, span));
        }

        for (i, segment) in args.chunks_exact(arity).enumerate() {
            // extra coordinate pairs after a move are implicit lines
            let code = if code == 'M' && i > 0 { 'L' } else { code };
            self.segment(code, relative, segment)?;
        }
        Ok(())
    }

    fn segment(&mut self, code: char, relative: bool, args: &[f64]) -> Result<(), PathError> {
        let origin = if relative { self.current } else { Point::ZERO };
        let at = |i: usize| origin + dvec2(args[i], args[i + 1]);

        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;
        let to = match code {
            'M' => {
                let to = at(0);
                self.path.move_to(to)?;
                self.subpath_start = to;
                to
            }
            'L' => {
                let to = at(0);
                self.path.line_to(to)?;
                to
            }
            'H' => {
                let to = dvec2(origin.x + args[0], self.current.y);
                self.path.line_to(to)?;
                to
            }
            'V' => {
                let to = dvec2(self.current.x, origin.y + args[0]);
                self.path.line_to(to)?;
                to
            }
            'C' => {
                let (ctrl1, ctrl2, to) = (at(0), at(2), at(4));
                self.path.cubic_bezier(ctrl1, ctrl2, to)?;
                cubic_ctrl = Some(ctrl2);
                to
            }
            'S' => {
                let ctrl1 = self.reflect(self.last_cubic_ctrl);
                let (ctrl2, to) = (at(0), at(2));
                self.path.cubic_bezier(ctrl1, ctrl2, to)?;
                cubic_ctrl = Some(ctrl2);
                to
            }
            'Q' => {
                let (ctrl, to) = (at(0), at(2));
                self.path.quadratic_bezier(ctrl, to)?;
                quad_ctrl = Some(ctrl);
                to
            }
            'T' => {
                let to = at(0);
                self.path.smooth_quadratic_bezier(to)?;
                quad_ctrl = Some(self.reflect(self.last_quad_ctrl));
                to
            }
            _ => {
                let to = origin + dvec2(args[5], args[6]);
                self.path.push(PathCommand::EllipticalArc {
                    to,
                    radius: dvec2(args[0].abs(), args[1].abs()),
                    x_axis_rotation: args[2],
                    large_arc: args[3] != 0.0,
                    sweep: args[4] != 0.0,
                })?;
                to
            }
        };

        self.current = to;
        self.last_cubic_ctrl = cubic_ctrl;
        self.last_quad_ctrl = quad_ctrl;
        Ok(())
    }

    /// Mirror the previous control point through the current point
    fn reflect(&self, ctrl: Option<Point>) -> Point {
        ctrl.map_or(self.current, |c| self.current * 2.0 - c)
    }
}

fn argument_count(
    command: char,
    expected: usize,
    found: usize,
    source: &str,
    span: (usize, usize),
) -> PathError {
    PathError::ArgumentCount {
        command,
        expected,
        found,
        src: miette::NamedSource::new("<path>", source.to_string()),
        span: span.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            actual.distance(expected) < 1e-9,
            "point mismatch: {} != {}",
            actual,
            expected
        );
    }

    // ==================== Path data tests ====================

    #[test]
    fn round_trip_through_d() {
        let d = "M 0,0 L 10,0 C 12,1 13,2.5 14,-3 Q 1,2 3,4 T 5,6 A 5,3 30 1 0 20,0 Z";
        let path = PathData::from_d(d).unwrap();
        assert_eq!(path.to_d(), d);
        assert_eq!(PathData::from_d(&path.to_d()).unwrap(), path);
    }

    #[test]
    fn compact_syntax_is_accepted() {
        let path: PathData = "M0,0L10-5l.5.5z".parse().unwrap();
        insta::assert_snapshot!(path.to_d(), @"M 0,0 L 10,-5 L 10.5,-4.5 Z");
    }

    #[test]
    fn relative_and_axis_commands_resolve() {
        let path = PathData::from_d("m 1 1 h 4 v 2 H 0 V 0 l 1 1").unwrap();
        insta::assert_snapshot!(path.to_d(), @"M 1,1 L 5,1 L 5,3 L 0,3 L 0,0 L 1,1");
    }

    #[test]
    fn implicit_lines_after_move() {
        let path = PathData::from_d("M 0 0 10 0 10 10").unwrap();
        assert_eq!(
            path.commands(),
            &[
                PathCommand::Move(pt(0.0, 0.0)),
                PathCommand::Line(pt(10.0, 0.0)),
                PathCommand::Line(pt(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn smooth_cubic_reflects_control_point() {
        let path = PathData::from_d("M 0 0 C 0 5 5 5 5 0 S 10 -5 10 0").unwrap();
        match path.commands()[2] {
            PathCommand::CubicBezier { ctrl1, ctrl2, to } => {
                assert_point_eq(ctrl1, pt(5.0, -5.0));
                assert_point_eq(ctrl2, pt(10.0, -5.0));
                assert_point_eq(to, pt(10.0, 0.0));
            }
            other => panic!("expected cubic, got {:?}", other),
        }
    }

    #[test]
    fn close_returns_to_subpath_start() {
        let path = PathData::from_d("M 2 2 l 5 0 z l 0 5").unwrap();
        assert_eq!(path.current_point(), Some(pt(2.0, 7.0)));
    }

    #[test]
    fn path_must_start_with_move() {
        assert!(matches!(
            PathData::from_d("L 1 1"),
            Err(PathError::MissingMove { .. })
        ));
    }

    #[test]
    fn wrong_argument_count_is_reported() {
        match PathData::from_d("M 0 0 C 1 2 3 4 5") {
            Err(PathError::ArgumentCount {
                command,
                expected,
                found,
                ..
            }) => {
                assert_eq!(command, 'C');
                assert_eq!(expected, 6);
                assert_eq!(found, 5);
            }
            other => panic!("expected argument count error, got {:?}", other),
        }
        assert!(matches!(
            PathData::from_d("M 0 0 Z 4"),
            Err(PathError::ArgumentCount { .. })
        ));
    }

    #[test]
    fn unknown_command_is_a_parse_error() {
        assert!(matches!(
            PathData::from_d("M 0 0 X 1 1"),
            Err(PathError::Parse { .. })
        ));
    }

    #[test]
    fn overflowing_number_is_malformed() {
        assert!(matches!(
            PathData::from_d("M 0 0 L 1e999 0"),
            Err(PathError::MalformedPoint { .. })
        ));
    }

    #[test]
    fn empty_path_is_empty() {
        assert!(PathData::from_d("  ").unwrap().is_empty());
    }

    // ==================== Transform list tests ====================

    #[test]
    fn transform_list_applies_rightmost_first() {
        let t = parse_transform("translate(10 5) rotate(90)").unwrap();
        assert_point_eq(t.apply(pt(1.0, 0.0)), pt(10.0, 6.0));
    }

    #[test]
    fn transform_defaults() {
        let t = parse_transform("scale(2)").unwrap();
        assert_point_eq(t.apply(pt(1.0, 3.0)), pt(2.0, 6.0));
        let t = parse_transform("translate(4)").unwrap();
        assert_point_eq(t.apply(pt(1.0, 3.0)), pt(5.0, 3.0));
        let t = parse_transform("rotate(180, 1, 1)").unwrap();
        assert_point_eq(t.apply(pt(2.0, 1.0)), pt(0.0, 1.0));
        assert!(parse_transform("").unwrap().is_identity());
    }

    #[test]
    fn matrix_matches_display() {
        let t = parse_transform("matrix(1 2 3 4 5 6)").unwrap();
        assert_eq!(t.to_string(), "matrix(1 2 3 4 5 6)");
    }

    #[test]
    fn transform_arity_is_checked() {
        assert!(matches!(
            parse_transform("rotate(1 2)"),
            Err(PathError::Parse { .. })
        ));
        assert!(matches!(
            parse_transform("spin(3)"),
            Err(PathError::Parse { .. })
        ));
    }
}
