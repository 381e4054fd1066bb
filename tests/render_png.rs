use std::fs;

use chrono::NaiveDate;

use clipperwatch::catalog::{BodyEntry, BodyRole};
use clipperwatch::horizons::OrbitalElements;
use clipperwatch::render;
use clipperwatch::scene::{ORBIT_PATH_POINTS, ScenePoint, orbit_path, project};
use clipperwatch::snapshot::{PlanetView, Snapshot, SpacecraftView};

fn synthetic_snapshot() -> Snapshot {
    let earth_elements = OrbitalElements {
        semi_major_axis_au: 1.0,
        eccentricity: 0.0167,
        argument_of_periapsis_deg: 102.9,
        ascending_node_longitude_deg: 174.8,
    };
    let earth = PlanetView {
        entry: BodyEntry {
            name: "Earth".to_string(),
            horizons_id: "399".to_string(),
            color: "#2271B3".to_string(),
            marker_size: 50,
            role: BodyRole::Planet,
        },
        display_name: "Earth".to_string(),
        position: project(310.0, 1.0),
        orbit: orbit_path(&earth_elements, ORBIT_PATH_POINTS),
    };

    let spacecraft = SpacecraftView {
        entry: BodyEntry {
            name: "Europa Clipper".to_string(),
            horizons_id: "2024-182A".to_string(),
            color: "#E27B58".to_string(),
            marker_size: 40,
            role: BodyRole::Spacecraft {
                launch_date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
            },
        },
        display_name: "Europa Clipper".to_string(),
        position: ScenePoint { x: 2.4, y: 1.1 },
        tail: vec![
            ScenePoint { x: 0.9, y: 0.1 },
            ScenePoint { x: 1.4, y: 0.5 },
            ScenePoint { x: 1.9, y: 0.8 },
            ScenePoint { x: 2.4, y: 1.1 },
        ],
    };

    Snapshot {
        planets: vec![earth],
        spacecraft,
        telemetry: vec![
            "Europa Clipper".to_string(),
            "System Status: Nominal".to_string(),
            "Epoch: 2026-Aug-06 00:00".to_string(),
            "Mission day: 660".to_string(),
            "Signal Delay: 1491.025 s".to_string(),
            "Distance to Sun: 3.21460 AU and moving away @ 12.34568 Km/s".to_string(),
            "Distance to Earth: 2.98765 AU and moving closer @ 14.25365 Km/s".to_string(),
            "Distance to Europa: 2.10000 AU and moving away @ 6.50000 Km/s".to_string(),
        ],
    }
}

#[test]
fn snapshot_renders_a_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let png_path = dir.path().join("snapshot.png");

    render::render_png(&synthetic_snapshot(), &png_path, 640, 360).expect("render");

    let metadata = fs::metadata(&png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn bad_catalog_colors_are_rejected_before_drawing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let png_path = dir.path().join("snapshot.png");

    let mut snapshot = synthetic_snapshot();
    snapshot.planets[0].entry.color = "cornflower".to_string();

    let err = render::render_png(&snapshot, &png_path, 640, 360).unwrap_err();
    assert!(matches!(err, render::RenderError::BadColor(_)));
    assert!(!png_path.exists());
}
