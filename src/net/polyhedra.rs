//! Polyhedra that can be built from identical pyramids.
//!
//! Each shape is a core solid with a pyramid raised on every face (or, for
//! the octahedron, two pyramids base to base). A net covers the lateral
//! faces of one pyramid, or a share of them.

use crate::errors::NetError;
use crate::types::EPSILON;

/// One pyramid of a polyhedron, in relative units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PyramidGeometry {
    /// `[apex to first base corner, apex to second base corner, base edge]`
    pub relative_face_edge_lengths: [f64; 3],
    /// Widest extent of the assembled shape, same units as the edge lengths
    pub diameter: f64,
    /// Lateral faces per pyramid
    pub face_count: u32,
    pub pyramids_per_shape: u32,
}

const SQRT_3: f64 = 1.732_050_807_568_877_2;
const PHI: f64 = crate::defaults::PHI;

/// The shape a fresh [`NetSpec`](super::spec::NetSpec) starts from
pub const GREAT_STELLATED_DODECAHEDRON: PyramidGeometry = PyramidGeometry {
    relative_face_edge_lengths: [PHI, PHI, 1.0],
    diameter: 4.534_567_884_504_683,
    face_count: 3,
    pyramids_per_shape: 20,
};

pub static POLYHEDRA: &[(&str, PyramidGeometry)] = &[
    ("great-stellated-dodecahedron", GREAT_STELLATED_DODECAHEDRON),
    (
        "kis-rhombic-dodecahedron",
        PyramidGeometry {
            relative_face_edge_lengths: [1.5 / SQRT_3, 1.118_033_988_749_895 / SQRT_3, 1.0],
            diameter: 4.0 / SQRT_3,
            face_count: 4,
            pyramids_per_shape: 12,
        },
    ),
    (
        "octahedron",
        PyramidGeometry {
            relative_face_edge_lengths: [1.0, 1.0, 1.0],
            diameter: std::f64::consts::SQRT_2,
            face_count: 4,
            pyramids_per_shape: 2,
        },
    ),
    (
        "pentakis-dodecahedron",
        PyramidGeometry {
            relative_face_edge_lengths: [0.872_677_996_2, 0.872_677_996_2, 1.0],
            diameter: 2.802_517_076,
            face_count: 5,
            pyramids_per_shape: 12,
        },
    ),
    (
        "small-stellated-dodecahedron",
        PyramidGeometry {
            relative_face_edge_lengths: [PHI, PHI, 1.0],
            diameter: 4.979_796_568_942_348,
            face_count: 5,
            pyramids_per_shape: 12,
        },
    ),
    (
        "tetrakis-hexahedron",
        PyramidGeometry {
            relative_face_edge_lengths: [0.75, 0.75, 1.0],
            diameter: SQRT_3,
            face_count: 4,
            pyramids_per_shape: 6,
        },
    ),
    (
        "triakis-octahedron",
        PyramidGeometry {
            relative_face_edge_lengths: [0.585_786_437_626_905, 0.585_786_437_626_905, 1.0],
            diameter: std::f64::consts::SQRT_2,
            face_count: 3,
            pyramids_per_shape: 8,
        },
    ),
    (
        "triakis-tetrahedron",
        PyramidGeometry {
            relative_face_edge_lengths: [0.6, 0.6, 1.0],
            diameter: 1.224_744_871_391_589,
            face_count: 3,
            pyramids_per_shape: 4,
        },
    ),
];

/// Names of every known polyhedron, sorted
pub fn polyhedron_names() -> impl Iterator<Item = &'static str> {
    POLYHEDRA.iter().map(|(name, _)| *name)
}

/// Look up a polyhedron by name
pub fn polyhedron(name: &str) -> Result<PyramidGeometry, NetError> {
    POLYHEDRA
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, geometry)| *geometry)
        .ok_or_else(|| NetError::UnknownPolyhedron {
            name: name.to_string(),
            suggestion: suggest(name),
        })
}

fn suggest(name: &str) -> Option<String> {
    let needle = name.to_lowercase().replace([' ', '_'], "-");
    let matches: Vec<&str> = polyhedron_names()
        .filter(|candidate| {
            candidate.contains(needle.as_str())
                || needle.split('-').any(|word| word.len() > 3 && candidate.contains(word))
        })
        .collect();
    if matches.is_empty() {
        None
    } else {
        Some(format!("did you mean {}?", matches.join(" or ")))
    }
}

impl PyramidGeometry {
    /// Whether the face is mirror symmetric about its apex bisector, so
    /// neighbouring faces need not be mirrored to line up.
    pub fn face_is_symmetrical(&self) -> bool {
        let [first, second, _] = self.relative_face_edge_lengths;
        (first - second).abs() < EPSILON
    }

    /// Ways to split one pyramid across several nets, largest first.
    ///
    /// Faces of asymmetric pyramids alternate in handedness, so those
    /// pyramids only split into pairs of faces.
    pub fn nets_per_pyramid_options(&self) -> Vec<u32> {
        let splittable = if self.face_is_symmetrical() {
            self.face_count
        } else {
            self.face_count / 2
        };
        (1..=splittable)
            .rev()
            .filter(|div| splittable % div == 0)
            .collect()
    }

    /// Faces on each net when the pyramid is split `nets_per_pyramid` ways
    pub fn faces_per_net(&self, nets_per_pyramid: u32) -> Result<u32, NetError> {
        if !self.nets_per_pyramid_options().contains(&nets_per_pyramid) {
            return Err(NetError::NetsPerPyramid {
                nets_per_pyramid,
                face_count: self.face_count,
            });
        }
        Ok(self.face_count / nets_per_pyramid)
    }

    /// Printed nets needed for the whole shape
    pub fn copies_needed(&self, nets_per_pyramid: u32) -> u32 {
        self.pyramids_per_shape * nets_per_pyramid
    }
}
