//! Mission telemetry lines for the status overlay.
//!
//! Everything here formats samples that were fetched earlier; no queries
//! happen in this crate. A formatter asked for a context that was never
//! fetched fails loudly with [`TelemetryError::MissingContext`] instead of
//! emitting a placeholder, since a silent zero on a mission status board
//! would read as real data.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use clipper_catalog::BodyEntry;
use clipper_core::constants::SPEED_OF_LIGHT_KM_S;
use clipper_core::units::au_to_km;
use clipper_horizons::EphemerisSample;

/// Observer key for the heliocentric context.
pub const SUN_OBSERVER: &str = "Sun";
/// Observer key for the geocentric context (signal delay is Earth-relative).
pub const EARTH_OBSERVER: &str = "Earth";

/// Errors raised when a formatter is invoked before its backing fetch.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry context `{0}` has not been fetched")]
    MissingContext(String),
}

/// Query-scoped telemetry context for the tracked spacecraft: one current
/// sample per observer, plus the since-launch series for the tail.
#[derive(Debug, Default, Clone)]
pub struct SpacecraftState {
    current: BTreeMap<String, EphemerisSample>,
    since_launch: Option<Vec<EphemerisSample>>,
}

impl SpacecraftState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current-epoch sample for one observer context.
    pub fn insert_current(&mut self, observer: &str, sample: EphemerisSample) {
        self.current.insert(observer.to_string(), sample);
    }

    /// Record the since-launch sample series.
    pub fn set_since_launch(&mut self, samples: Vec<EphemerisSample>) {
        self.since_launch = Some(samples);
    }

    /// The current sample keyed to `observer`.
    pub fn current(&self, observer: &str) -> Result<&EphemerisSample, TelemetryError> {
        self.current.get(observer).ok_or_else(|| {
            TelemetryError::MissingContext(format!("{observer} observer sample"))
        })
    }

    /// The since-launch series, in ascending epoch order.
    pub fn since_launch(&self) -> Result<&[EphemerisSample], TelemetryError> {
        self.since_launch
            .as_deref()
            .ok_or_else(|| TelemetryError::MissingContext("since-launch series".to_string()))
    }
}

/// One-way light travel time for an Earth-relative range.
pub fn signal_delay_seconds(observer_range_au: f64) -> f64 {
    au_to_km(observer_range_au) / SPEED_OF_LIGHT_KM_S
}

/// Distance and radial speed relative to one observer.
///
/// Positive range-rate means the spacecraft is receding from the observer;
/// the displayed speed is always the magnitude.
pub fn distance_speed_line(
    state: &SpacecraftState,
    observer: &str,
) -> Result<String, TelemetryError> {
    let sample = state.current(observer)?;
    let rate = sample.observer_range_rate_km_s;
    let motion = if rate > 0.0 {
        "moving away"
    } else {
        "moving closer"
    };
    Ok(format!(
        "Distance to {observer}: {:.5} AU and {motion} @ {:.5} Km/s",
        sample.observer_range_au,
        rate.abs()
    ))
}

/// One-way signal delay line, derived from the Earth observer context.
pub fn signal_delay_line(state: &SpacecraftState) -> Result<String, TelemetryError> {
    let sample = state.current(EARTH_OBSERVER)?;
    let seconds = signal_delay_seconds(sample.observer_range_au);
    Ok(format!("Signal Delay: {seconds:.3} s"))
}

/// Whole days elapsed since launch as of `today`.
pub fn mission_day_line(entry: &BodyEntry, today: NaiveDate) -> Result<String, TelemetryError> {
    let launch = entry.launch_date().ok_or_else(|| {
        TelemetryError::MissingContext(format!("launch date for {}", entry.name))
    })?;
    let days = today.signed_duration_since(launch).num_days();
    Ok(format!("Mission day: {days}"))
}

/// Current-epoch label from the heliocentric context.
pub fn epoch_line(state: &SpacecraftState) -> Result<String, TelemetryError> {
    let sample = state.current(SUN_OBSERVER)?;
    Ok(format!("Epoch: {}", sample.epoch))
}

/// Assemble the full status overlay in display order.
pub fn status_block(
    entry: &BodyEntry,
    state: &SpacecraftState,
    extra_observer: &str,
    today: NaiveDate,
) -> Result<Vec<String>, TelemetryError> {
    Ok(vec![
        entry.name.clone(),
        "System Status: Nominal".to_string(),
        epoch_line(state)?,
        mission_day_line(entry, today)?,
        signal_delay_line(state)?,
        distance_speed_line(state, SUN_OBSERVER)?,
        distance_speed_line(state, EARTH_OBSERVER)?,
        distance_speed_line(state, extra_observer)?,
    ])
}
