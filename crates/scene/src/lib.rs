//! Planar scene geometry: projection of ephemeris samples and orbit paths
//! into the heliocentric-ecliptic drawing plane.
//!
//! The projection is deliberately flat: ecliptic latitude is dropped and
//! longitude is treated as a polar angle, so every body lands in the same
//! 2-D plane the renderer draws. Inclination is not modeled anywhere in
//! this crate; the plotted orbits are planar approximations.

use std::f64::consts::TAU;

use clipper_horizons::{EphemerisSample, OrbitalElements};

/// Number of points generated along a reconstructed orbit path.
pub const ORBIT_PATH_POINTS: usize = 360;

/// A point in the drawing plane, both axes in AU, Sun at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
}

/// Project one (longitude, range) pair into the drawing plane.
///
/// Longitude is in degrees on the standard ecliptic convention, range in
/// AU. Plain polar-to-Cartesian conversion; kept free of alternate trig
/// identities so the output matches the reference rendering bit-for-bit.
pub fn project(longitude_deg: f64, range_au: f64) -> ScenePoint {
    let angle = longitude_deg.to_radians();
    ScenePoint {
        x: range_au * angle.cos(),
        y: range_au * angle.sin(),
    }
}

/// Reconstruct a closed orbit polyline from osculating elements.
///
/// True anomaly is swept over [0, 2π] with both endpoints included so the
/// first and last points coincide and the polyline closes when drawn. The
/// radius follows the polar conic form `r = a(1 - e²) / (1 + e cos θ)`,
/// which keeps the Sun at the orbital focus rather than the ellipse
/// center. The ellipse is then swung into place by a single planar
/// rotation through the sum of the argument of periapsis and the
/// longitude of the ascending node; the two angles collapse into one
/// because the scene has no third axis to separate them.
pub fn orbit_path(elements: &OrbitalElements, points: usize) -> Vec<ScenePoint> {
    assert!(points >= 2, "an orbit path needs at least two points");
    let a = elements.semi_major_axis_au;
    let e = elements.eccentricity;
    let semi_latus = a * (1.0 - e * e);

    let rotation =
        (elements.argument_of_periapsis_deg + elements.ascending_node_longitude_deg).to_radians();
    let (sin_rot, cos_rot) = rotation.sin_cos();

    let mut path = Vec::with_capacity(points);
    for i in 0..points {
        let theta = TAU * i as f64 / (points - 1) as f64;
        let r = semi_latus / (1.0 + e * theta.cos());
        let x = r * theta.cos();
        let y = r * theta.sin();
        path.push(ScenePoint {
            x: x * cos_rot - y * sin_rot,
            y: x * sin_rot + y * cos_rot,
        });
    }
    path
}

/// Project a time-ordered sample series into an open polyline.
///
/// The input is trusted to be in ascending epoch order (Horizons returns
/// range queries that way); the output preserves it one-to-one, with no
/// smoothing or resampling, so the drawn path is the flight path.
pub fn trajectory(samples: &[EphemerisSample]) -> Vec<ScenePoint> {
    samples
        .iter()
        .map(|sample| project(sample.ecliptic_longitude_deg, sample.heliocentric_range_au))
        .collect()
}
