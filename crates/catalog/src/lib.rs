//! Body catalog models and loaders for ClipperWatch.
//!
//! The catalog is a read-only table of the bodies the snapshot can show:
//! planets with orbit paths, and trackable spacecraft with launch dates.
//! A default table is compiled in; an alternative YAML file can be loaded
//! at runtime.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use thiserror::Error;

/// YAML catalog compiled into the binary, used when no override is given.
const BUILTIN_BODIES: &str = include_str!("../../../configs/bodies.yaml");

/// Role-specific catalog fields. Planets get an orbit path reconstructed
/// from osculating elements at render time; spacecraft carry the launch
/// date that anchors the since-launch trajectory and mission-day counter.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum BodyRole {
    Planet,
    Spacecraft { launch_date: NaiveDate },
}

/// One catalog row: identity, Horizons designation, and display attributes.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyEntry {
    pub name: String,
    /// JPL Horizons designation (`199`, `2024-182A`, ...).
    pub horizons_id: String,
    /// Hex RGB marker color, `#RRGGBB`.
    pub color: String,
    /// Scatter area of the marker, matplotlib-style points squared.
    pub marker_size: u32,
    #[serde(flatten)]
    pub role: BodyRole,
}

impl BodyEntry {
    pub fn is_spacecraft(&self) -> bool {
        matches!(self.role, BodyRole::Spacecraft { .. })
    }

    /// Launch date for spacecraft rows, `None` for planets.
    pub fn launch_date(&self) -> Option<NaiveDate> {
        match self.role {
            BodyRole::Spacecraft { launch_date } => Some(launch_date),
            BodyRole::Planet => None,
        }
    }
}

/// Errors raised while loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog YAML: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("body '{0}' has no Horizons designation in the catalog")]
    UnknownBody(String),
    #[error("catalog contains no spacecraft entries")]
    NoSpacecraft,
}

/// Horizons designations for observer centers that are not catalog rows.
/// Observer locations are body centers (site `500@<id>`).
const CENTER_IDS: &[(&str, &str)] = &[
    ("Sun", "10"),
    ("Mercury", "199"),
    ("Venus", "299"),
    ("Earth", "399"),
    ("Mars", "499"),
    ("Jupiter", "599"),
    ("Europa", "502"),
    ("Saturn", "699"),
    ("Uranus", "799"),
    ("Neptune", "899"),
    ("Pluto", "999"),
];

/// The loaded body table.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<BodyEntry>,
}

impl Catalog {
    /// Parse the compiled-in default table.
    pub fn builtin() -> Result<Self, CatalogError> {
        let entries = serde_yaml::from_str(BUILTIN_BODIES)?;
        Ok(Self { entries })
    }

    /// Load a catalog from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let reader = File::open(path)?;
        let entries = serde_yaml::from_reader(reader)?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[BodyEntry] {
        &self.entries
    }

    /// Case-insensitive lookup of a catalog row by display name.
    pub fn find(&self, name: &str) -> Option<&BodyEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// The spacecraft subset, in catalog order.
    pub fn spacecraft(&self) -> Vec<&BodyEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.is_spacecraft())
            .collect()
    }

    /// Uniform draw over the spacecraft subset.
    pub fn random_spacecraft<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<&BodyEntry, CatalogError> {
        self.spacecraft()
            .choose(rng)
            .copied()
            .ok_or(CatalogError::NoSpacecraft)
    }

    /// Resolve a display name to its Horizons designation.
    ///
    /// Catalog rows are checked first, then the static table of observer
    /// centers. An unresolved name is a configuration error and must be
    /// reported before any fetch is attempted.
    pub fn horizons_id(&self, name: &str) -> Result<&str, CatalogError> {
        if let Some(entry) = self.find(name) {
            return Ok(&entry.horizons_id);
        }
        CENTER_IDS
            .iter()
            .find(|(center, _)| center.eq_ignore_ascii_case(name))
            .map(|(_, id)| *id)
            .ok_or_else(|| CatalogError::UnknownBody(name.to_string()))
    }

    /// Horizons observer location string for a body-centered site.
    pub fn observer_location(&self, name: &str) -> Result<String, CatalogError> {
        Ok(format!("500@{}", self.horizons_id(name)?))
    }
}
