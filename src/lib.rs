//! Cut and score path synthesis for foldable pyramid nets.
//!
//! A net is built from a [`NetSpec`]: the pyramid's face geometry plus the
//! tab, score and decoration parameters. [`make_paths`] turns it into two
//! paths, one to cut through and one to crease.

pub mod defaults;
pub mod errors;
pub mod geom;
mod log;
pub mod net;
pub mod path;
pub mod range;
pub mod shapes;
pub mod types;

pub use errors::{GeometryError, NetError, PathError};
pub use net::spec::NetSpec;
pub use net::{NetPaths, assemble_parts, make_paths, test_tabs};
pub use path::{PathCommand, PathData};
pub use types::{BBox, Point, Transform};

/// The dieline for a named polyhedron with every parameter at its default.
pub fn dieline(shape_name: &str) -> Result<NetPaths, NetError> {
    make_paths(&NetSpec::for_polyhedron(shape_name)?)
}
