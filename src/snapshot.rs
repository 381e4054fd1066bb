//! One-shot snapshot assembly.
//!
//! Fetches every catalog planet plus the tracked spacecraft from Horizons,
//! strictly one request at a time (the provider throttles parallel
//! clients), and turns the results into drawable geometry and telemetry
//! lines. Any failure aborts the whole run; a partially filled snapshot is
//! never returned.

use chrono::NaiveDate;
use thiserror::Error;

use clipper_catalog::{BodyEntry, Catalog, CatalogError};
use clipper_horizons::{EphemerisSample, EpochSpec, HorizonsClient, HorizonsError};
use clipper_scene::{self as scene, ORBIT_PATH_POINTS, ScenePoint};
use clipper_telemetry::{
    self as telemetry, EARTH_OBSERVER, SUN_OBSERVER, SpacecraftState, TelemetryError,
};

/// Horizons step size for the since-launch tail series.
const TAIL_STEP: &str = "7d";

/// Errors that can abort snapshot assembly.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Horizons(#[from] HorizonsError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// A positioned planet with its reconstructed orbit path.
#[derive(Debug, Clone)]
pub struct PlanetView {
    pub entry: BodyEntry,
    pub display_name: String,
    pub position: ScenePoint,
    pub orbit: Vec<ScenePoint>,
}

/// The tracked spacecraft with its since-launch tail.
#[derive(Debug, Clone)]
pub struct SpacecraftView {
    pub entry: BodyEntry,
    pub display_name: String,
    pub position: ScenePoint,
    pub tail: Vec<ScenePoint>,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub planets: Vec<PlanetView>,
    pub spacecraft: SpacecraftView,
    pub telemetry: Vec<String>,
}

/// Per-run assembly inputs, decided once in `main` and read-only after.
#[derive(Debug, Clone)]
pub struct SnapshotConfig<'a> {
    /// Third telemetry observer after Sun and Earth.
    pub extra_observer: &'a str,
    /// Civil date used for the mission-day counter and the tail stop time.
    pub today: NaiveDate,
    /// Query instant for all current-epoch fetches, as a Julian date.
    pub instant_jd: f64,
}

/// Assemble the full snapshot for the tracked spacecraft.
pub fn assemble(
    client: &HorizonsClient,
    catalog: &Catalog,
    tracked: &BodyEntry,
    config: &SnapshotConfig<'_>,
) -> Result<Snapshot, SnapshotError> {
    let sun_center = catalog.observer_location(SUN_OBSERVER)?;
    let now = EpochSpec::Instant(config.instant_jd);

    let mut planets = Vec::new();
    for entry in catalog.entries().iter().filter(|e| !e.is_spacecraft()) {
        let observation = client.observe(&entry.horizons_id, &sun_center, &now)?;
        let sample = first_sample(&observation.samples)?;
        let position = scene::project(sample.ecliptic_longitude_deg, sample.heliocentric_range_au);
        let elements = client.elements(&entry.horizons_id, &sun_center, &now)?;
        planets.push(PlanetView {
            entry: entry.clone(),
            display_name: observation.display_name,
            position,
            orbit: scene::orbit_path(&elements, ORBIT_PATH_POINTS),
        });
    }

    let mut state = SpacecraftState::new();

    let observation = client.observe(&tracked.horizons_id, &sun_center, &now)?;
    let display_name = observation.display_name.clone();
    let current = first_sample(&observation.samples)?.clone();
    let position = scene::project(current.ecliptic_longitude_deg, current.heliocentric_range_au);
    state.insert_current(SUN_OBSERVER, current);

    for observer in [EARTH_OBSERVER, config.extra_observer] {
        let center = catalog.observer_location(observer)?;
        let observation = client.observe(&tracked.horizons_id, &center, &now)?;
        state.insert_current(observer, first_sample(&observation.samples)?.clone());
    }

    let launch = tracked
        .launch_date()
        .ok_or_else(|| TelemetryError::MissingContext(format!("launch date for {}", tracked.name)))?;
    let tail_range = EpochSpec::Range {
        start: launch.format("%Y-%m-%d").to_string(),
        stop: config.today.format("%Y-%m-%d").to_string(),
        step: TAIL_STEP.to_string(),
    };
    let tail_observation = client.observe(&tracked.horizons_id, &sun_center, &tail_range)?;
    state.set_since_launch(tail_observation.samples);
    let tail = scene::trajectory(state.since_launch()?);

    let telemetry = telemetry::status_block(tracked, &state, config.extra_observer, config.today)?;

    Ok(Snapshot {
        planets,
        spacecraft: SpacecraftView {
            entry: tracked.clone(),
            display_name,
            position,
            tail,
        },
        telemetry,
    })
}

fn first_sample(samples: &[EphemerisSample]) -> Result<&EphemerisSample, SnapshotError> {
    samples
        .first()
        .ok_or_else(|| HorizonsError::Malformed("ephemeris table has no rows".to_string()).into())
}
