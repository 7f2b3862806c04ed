//! Face decorations: artwork placed on every face of a net.
//!
//! Only path patterns are cut; raw markup and images are printed and carry
//! no geometry of their own.

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::errors::PathError;
use crate::path::{PathData, parse_transform};
use crate::types::Transform;

/// What every decoration variant can report about itself
#[enum_dispatch]
pub trait DecorationPattern {
    /// Geometry to cut out of each face, in pattern units
    fn cut_path(&self) -> Option<&PathData>;

    /// Natural width and height of the artwork, when it has one
    fn dimensions(&self) -> Option<DVec2>;

    /// File the artwork was loaded from
    fn source_file_name(&self) -> Option<&str>;

    /// How the cut path's interior is decided, for variants that have one
    fn fill_rule(&self) -> Option<FillRule> {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

impl FillRule {
    /// Value of the SVG `fill-rule` attribute
    pub fn as_svg(self) -> &'static str {
        match self {
            FillRule::NonZero => "nonzero",
            FillRule::EvenOdd => "evenodd",
        }
    }
}

/// Raw SVG markup printed on the face
#[derive(Clone, Debug, PartialEq)]
pub struct RawPattern {
    pub svg: String,
}

impl DecorationPattern for RawPattern {
    fn cut_path(&self) -> Option<&PathData> {
        None
    }

    fn dimensions(&self) -> Option<DVec2> {
        None
    }

    fn source_file_name(&self) -> Option<&str> {
        None
    }
}

/// Vector artwork that is cut out of the face
#[derive(Clone, Debug, PartialEq)]
pub struct PathPattern {
    pub path: PathData,
    pub source_file_name: Option<String>,
}

impl PathPattern {
    /// Pattern from an SVG `d` string
    pub fn from_d(d: &str, source_file_name: Option<String>) -> Result<Self, PathError> {
        Ok(PathPattern {
            path: PathData::from_d(d)?,
            source_file_name,
        })
    }
}

impl DecorationPattern for PathPattern {
    fn cut_path(&self) -> Option<&PathData> {
        Some(&self.path)
    }

    fn dimensions(&self) -> Option<DVec2> {
        let bbox = self.path.bounding_box();
        (!bbox.is_empty()).then(|| DVec2::new(bbox.width(), bbox.height()))
    }

    fn source_file_name(&self) -> Option<&str> {
        self.source_file_name.as_deref()
    }

    fn fill_rule(&self) -> Option<FillRule> {
        Some(FillRule::EvenOdd)
    }
}

/// A raster image printed on the face
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePattern {
    pub dimensions: DVec2,
    pub source_file_name: String,
}

impl DecorationPattern for ImagePattern {
    fn cut_path(&self) -> Option<&PathData> {
        None
    }

    fn dimensions(&self) -> Option<DVec2> {
        Some(self.dimensions)
    }

    fn source_file_name(&self) -> Option<&str> {
        Some(&self.source_file_name)
    }
}

#[enum_dispatch(DecorationPattern)]
#[derive(Clone, Debug, PartialEq)]
pub enum FaceDecoration {
    Raw(RawPattern),
    Path(PathPattern),
    Image(ImagePattern),
}

impl FaceDecoration {
    pub fn kind(&self) -> &'static str {
        match self {
            FaceDecoration::Raw(_) => "raw",
            FaceDecoration::Path(_) => "path",
            FaceDecoration::Image(_) => "image",
        }
    }
}

/// A decoration with its position on the face
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedDecoration {
    pub pattern: FaceDecoration,
    /// Maps pattern units onto the relative face, applied before scaling
    pub transform: Transform,
}

impl PlacedDecoration {
    pub fn new(pattern: impl Into<FaceDecoration>) -> Self {
        PlacedDecoration {
            pattern: pattern.into(),
            transform: Transform::IDENTITY,
        }
    }

    /// Set the placement from an SVG transform list
    pub fn with_transform_str(mut self, transform: &str) -> Result<Self, PathError> {
        self.transform = parse_transform(transform)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    #[test]
    fn only_paths_cut() {
        let path = PathPattern::from_d("M 0 0 L 2 0 L 2 1 Z", Some("star.svg".into())).unwrap();
        let decorations: Vec<FaceDecoration> = vec![
            RawPattern { svg: "<g/>".into() }.into(),
            path.into(),
            ImagePattern {
                dimensions: DVec2::new(640.0, 480.0),
                source_file_name: "photo.png".into(),
            }
            .into(),
        ];
        let cutting: Vec<&str> = decorations
            .iter()
            .filter(|d| d.cut_path().is_some())
            .map(FaceDecoration::kind)
            .collect();
        assert_eq!(cutting, vec!["path"]);
    }

    #[test]
    fn dimensions_and_sources() {
        let path = FaceDecoration::from(
            PathPattern::from_d("M 1 1 L 4 1 L 4 3 Z", None).unwrap(),
        );
        assert_eq!(path.dimensions(), Some(DVec2::new(3.0, 2.0)));
        assert_eq!(path.source_file_name(), None);
        assert_eq!(path.fill_rule().map(FillRule::as_svg), Some("evenodd"));

        let image = FaceDecoration::from(ImagePattern {
            dimensions: DVec2::new(10.0, 20.0),
            source_file_name: "tile.png".into(),
        });
        assert_eq!(image.source_file_name(), Some("tile.png"));
        assert_eq!(image.dimensions(), Some(DVec2::new(10.0, 20.0)));
        assert_eq!(image.fill_rule(), None);
    }

    #[test]
    fn placement_from_transform_string() {
        let placed = PlacedDecoration::new(RawPattern { svg: String::new() })
            .with_transform_str("translate(3 4)")
            .unwrap();
        assert_eq!(placed.transform.apply(pt(1.0, 1.0)), pt(4.0, 5.0));
        assert!(
            PlacedDecoration::new(RawPattern { svg: String::new() })
                .with_transform_str("wobble(1)")
                .is_err()
        );
    }
}
