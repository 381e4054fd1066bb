//! Decoding of Horizons responses.
//!
//! The API wraps the classic ephemeris printout in a JSON envelope; the
//! printout itself carries a CSV table between `$$SOE`/`$$EOE` markers with
//! a header line above the table. Columns are resolved by header name, not
//! position, since Horizons inserts flag columns depending on the query.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use crate::{BodyObservation, EphemerisSample, HorizonsError, OrbitalElements};

#[derive(Deserialize)]
struct Envelope {
    result: Option<String>,
    error: Option<String>,
}

/// Unwrap the JSON envelope and return the ephemeris printout.
pub fn parse_envelope(body: &str) -> Result<String, HorizonsError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|err| HorizonsError::Malformed(format!("bad JSON envelope: {err}")))?;
    if let Some(error) = envelope.error {
        return Err(HorizonsError::Api(error));
    }
    envelope
        .result
        .ok_or_else(|| HorizonsError::Malformed("envelope has no `result` field".to_string()))
}

/// Decode an OBSERVER-type printout (quantities 18, 19, 20) into samples.
pub fn parse_observer_response(result: &str) -> Result<BodyObservation, HorizonsError> {
    let display_name = parse_display_name(result)?;
    let (headers, records) = ephemeris_table(result)?;

    let lon = column(&headers, "hEcl-Lon")?;
    let lat = column(&headers, "hEcl-Lat")?;
    let range = column(&headers, "r")?;
    let delta = column(&headers, "delta")?;
    let deldot = column(&headers, "deldot")?;

    let mut samples = Vec::with_capacity(records.len());
    for record in &records {
        // The date is always the leading column of an observer table.
        let epoch = record
            .get(0)
            .ok_or_else(|| HorizonsError::Malformed("ephemeris row has no date".to_string()))?
            .to_string();
        samples.push(EphemerisSample {
            epoch,
            ecliptic_longitude_deg: numeric(record, lon, "hEcl-Lon")?,
            ecliptic_latitude_deg: numeric(record, lat, "hEcl-Lat")?,
            heliocentric_range_au: numeric(record, range, "r")?,
            observer_range_au: numeric(record, delta, "delta")?,
            observer_range_rate_km_s: numeric(record, deldot, "deldot")?,
        });
    }
    if samples.is_empty() {
        return Err(HorizonsError::Malformed(
            "ephemeris table has no rows".to_string(),
        ));
    }

    Ok(BodyObservation {
        display_name,
        samples,
    })
}

/// Decode an ELEMENTS-type printout into the first row's osculating set.
pub fn parse_elements_response(result: &str) -> Result<OrbitalElements, HorizonsError> {
    let (headers, records) = ephemeris_table(result)?;

    let ec = column(&headers, "EC")?;
    let om = column(&headers, "OM")?;
    let w = column(&headers, "W")?;
    let a = column(&headers, "A")?;

    let record = records
        .first()
        .ok_or_else(|| HorizonsError::Malformed("elements table has no rows".to_string()))?;

    Ok(OrbitalElements {
        semi_major_axis_au: numeric(record, a, "A")?,
        eccentricity: numeric(record, ec, "EC")?,
        argument_of_periapsis_deg: numeric(record, w, "W")?,
        ascending_node_longitude_deg: numeric(record, om, "OM")?,
    })
}

/// Resolved display name from the `Target body name:` header line, cut at
/// the first parenthesis as the designation suffix is not display-worthy.
fn parse_display_name(result: &str) -> Result<String, HorizonsError> {
    result
        .lines()
        .find_map(|line| line.trim_start().strip_prefix("Target body name:"))
        .and_then(|rest| rest.split('(').next())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| HorizonsError::Malformed("target body name missing".to_string()))
}

/// Extract the CSV table bracketed by `$$SOE`/`$$EOE` plus its header line.
fn ephemeris_table(result: &str) -> Result<(StringRecord, Vec<StringRecord>), HorizonsError> {
    let lines: Vec<&str> = result.lines().collect();
    let soe = lines
        .iter()
        .position(|line| line.trim() == "$$SOE")
        .ok_or(HorizonsError::MissingTable)?;
    let eoe = lines
        .iter()
        .position(|line| line.trim() == "$$EOE")
        .ok_or(HorizonsError::MissingTable)?;
    if eoe < soe {
        return Err(HorizonsError::MissingTable);
    }

    // The header is the nearest comma-separated line above $$SOE; Horizons
    // pads the gap with `****` separator rules and blank lines.
    let header = lines[..soe]
        .iter()
        .rev()
        .find(|line| line.contains(',') && !line.trim_start().starts_with('*'))
        .ok_or(HorizonsError::MissingTable)?;

    let mut csv_text = String::from(*header);
    for line in &lines[soe + 1..eoe] {
        if line.trim().is_empty() {
            continue;
        }
        csv_text.push('\n');
        csv_text.push_str(line);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(csv_text.as_bytes());
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }
    Ok((headers, records))
}

fn column(headers: &StringRecord, name: &'static str) -> Result<usize, HorizonsError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or(HorizonsError::MissingColumn(name))
}

fn numeric(
    record: &StringRecord,
    idx: usize,
    column: &'static str,
) -> Result<f64, HorizonsError> {
    let value = record.get(idx).unwrap_or("");
    value.parse().map_err(|_| HorizonsError::BadNumber {
        column,
        value: value.to_string(),
    })
}
