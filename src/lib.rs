//! Snapshot assembly and rendering for ClipperWatch.
//!
//! The workspace crates supply the catalog, the Horizons client, the scene
//! geometry, and the telemetry formatting; this crate strings them into the
//! one-shot pipeline (fetch, project, format, draw) behind the CLI binary.

pub mod render;
pub mod snapshot;

pub use clipper_catalog as catalog;
pub use clipper_horizons as horizons;
pub use clipper_scene as scene;
pub use clipper_telemetry as telemetry;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
