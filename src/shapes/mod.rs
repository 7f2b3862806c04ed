//! Shape builders: dashed scores, rounded outlines and connection tabs.
//!
//! Every tab builder places its tab on the left side of the directed edge
//! it is given (rotate the edge direction by +π/2 to find it).

pub mod arrow_tab;
pub mod ascendant_edge_tabs;
pub mod base_edge_tab;
pub mod dash;
pub mod generic;

use crate::path::PathData;
use crate::types::{BBox, Transform};

/// A cut path and the score path that goes with it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabPaths {
    pub cut: PathData,
    pub score: PathData,
}

impl TabPaths {
    pub fn transformed(&self, t: Transform) -> TabPaths {
        TabPaths {
            cut: self.cut.transformed(t),
            score: self.score.transformed(t),
        }
    }

    pub fn bounding_box(&self) -> BBox {
        let mut bbox = self.cut.bounding_box();
        bbox.expand_bbox(&self.score.bounding_box());
        bbox
    }
}
