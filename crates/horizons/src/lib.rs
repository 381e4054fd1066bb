//! Blocking JPL Horizons API client.
//!
//! One query per body and observer context, issued strictly sequentially:
//! Horizons throttles clients that run more than a couple of requests in
//! parallel, so the snapshot pipeline never fans out. Failures are not
//! retried; the tool is a one-shot snapshot generator and a failed fetch
//! aborts the run.

use reqwest::blocking::Client;
use thiserror::Error;

pub mod parse;

use crate::parse::{parse_elements_response, parse_envelope, parse_observer_response};

/// Horizons API endpoint.
const API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

/// One row of an OBSERVER-type ephemeris query (quantities 18, 19, 20).
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisSample {
    /// Timestamp string exactly as Horizons prints it.
    pub epoch: String,
    /// Heliocentric ecliptic longitude (deg).
    pub ecliptic_longitude_deg: f64,
    /// Heliocentric ecliptic latitude (deg).
    pub ecliptic_latitude_deg: f64,
    /// Heliocentric range (AU).
    pub heliocentric_range_au: f64,
    /// Range from the query's observer center (AU).
    pub observer_range_au: f64,
    /// Range-rate relative to the observer center (km/s, positive receding).
    pub observer_range_rate_km_s: f64,
}

/// Osculating elements for one epoch, as returned by an ELEMENTS query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis_au: f64,
    /// Eccentricity, below 1 for the closed orbits drawn here.
    pub eccentricity: f64,
    pub argument_of_periapsis_deg: f64,
    pub ascending_node_longitude_deg: f64,
}

/// Parsed result of one observer query: the resolved display name and the
/// time-ordered sample rows (Horizons emits them in ascending epoch order).
#[derive(Debug, Clone)]
pub struct BodyObservation {
    pub display_name: String,
    pub samples: Vec<EphemerisSample>,
}

/// Epoch selection for a query.
#[derive(Debug, Clone)]
pub enum EpochSpec {
    /// A single instant, given as a Julian date.
    Instant(f64),
    /// A start/stop range walked at a fixed step (Horizons step syntax,
    /// e.g. `7d`). Dates are calendar strings Horizons accepts.
    Range {
        start: String,
        stop: String,
        step: String,
    },
}

/// Errors surfaced while querying or decoding Horizons responses.
#[derive(Debug, Error)]
pub enum HorizonsError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Horizons API error: {0}")]
    Api(String),
    #[error("malformed Horizons response: {0}")]
    Malformed(String),
    #[error("ephemeris table missing from Horizons response")]
    MissingTable,
    #[error("column `{0}` missing from Horizons table")]
    MissingColumn(&'static str),
    #[error("failed to read ephemeris row: {0}")]
    Csv(#[from] csv::Error),
    #[error("non-numeric value in column `{column}`: `{value}`")]
    BadNumber {
        column: &'static str,
        value: String,
    },
}

/// Synchronous Horizons client. Cheap to construct, holds only the HTTP
/// client and endpoint.
#[derive(Debug)]
pub struct HorizonsClient {
    client: Client,
    endpoint: String,
}

impl HorizonsClient {
    pub fn new() -> Result<Self, HorizonsError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: API_URL.to_string(),
        })
    }

    /// Fetch observer-relative ephemerides (quantities 18, 19, 20) for one
    /// body as seen from a body-centered site such as `500@10`.
    pub fn observe(
        &self,
        command_id: &str,
        center: &str,
        epochs: &EpochSpec,
    ) -> Result<BodyObservation, HorizonsError> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("COMMAND", quoted(command_id)),
            ("OBJ_DATA", "'NO'".to_string()),
            ("MAKE_EPHEM", "'YES'".to_string()),
            ("EPHEM_TYPE", "'OBSERVER'".to_string()),
            ("CENTER", quoted(center)),
            ("QUANTITIES", "'18,19,20'".to_string()),
            ("CSV_FORMAT", "'YES'".to_string()),
        ];
        push_epochs(&mut params, epochs);
        let result = self.request(&params)?;
        parse_observer_response(&result)
    }

    /// Fetch osculating elements for one body about the given center at a
    /// single instant. Output units are AU and days so the semi-major axis
    /// needs no conversion.
    pub fn elements(
        &self,
        command_id: &str,
        center: &str,
        epochs: &EpochSpec,
    ) -> Result<OrbitalElements, HorizonsError> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("COMMAND", quoted(command_id)),
            ("OBJ_DATA", "'NO'".to_string()),
            ("MAKE_EPHEM", "'YES'".to_string()),
            ("EPHEM_TYPE", "'ELEMENTS'".to_string()),
            ("CENTER", quoted(center)),
            ("OUT_UNITS", "'AU-D'".to_string()),
            ("CSV_FORMAT", "'YES'".to_string()),
        ];
        push_epochs(&mut params, epochs);
        let result = self.request(&params)?;
        parse_elements_response(&result)
    }

    fn request(&self, params: &[(&str, String)]) -> Result<String, HorizonsError> {
        let body = self
            .client
            .get(&self.endpoint)
            .query(params)
            .send()?
            .error_for_status()?
            .text()?;
        parse_envelope(&body)
    }
}

fn push_epochs(params: &mut Vec<(&str, String)>, epochs: &EpochSpec) {
    match epochs {
        EpochSpec::Instant(jd) => {
            params.push(("TLIST", format!("'{jd:.8}'")));
        }
        EpochSpec::Range { start, stop, step } => {
            params.push(("START_TIME", quoted(start)));
            params.push(("STOP_TIME", quoted(stop)));
            params.push(("STEP_SIZE", quoted(step)));
        }
    }
}

/// Horizons expects string-valued parameters wrapped in single quotes.
fn quoted(value: &str) -> String {
    format!("'{value}'")
}
