//! Print the dieline for a polyhedron as an SVG document.
//!
//! Run with: cargo run --example net --features tracing -- octahedron [nets-per-pyramid]
//! Set RUST_LOG=dieline=debug to see the assembly steps.

use dieline::net::polyhedra::polyhedron_names;
use dieline::{NetSpec, defaults, make_paths};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let shape = args
        .next()
        .unwrap_or_else(|| defaults::DEFAULT_POLYHEDRON.to_string());
    if shape == "--list" {
        for name in polyhedron_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut spec = NetSpec::for_polyhedron(&shape)?;
    if let Some(nets) = args.next() {
        spec.nets_per_pyramid = nets
            .parse()
            .map_err(|e| miette::miette!("invalid nets per pyramid {nets:?}: {e}"))?;
    }

    let paths = make_paths(&spec)?;
    eprintln!(
        "{}: print {} copies",
        spec.file_basename(),
        spec.copies_needed()
    );
    println!("{}", paths.to_svg(1.0)?);
    Ok(())
}
