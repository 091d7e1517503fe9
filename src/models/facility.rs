use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::geo::Coordinates;

const COMMUTER_TYPE: &str = "commuter";

/// Transit station or store used as a proximity reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub lat: f64,
    pub lng: f64,
}

impl Facility {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    pub fn is_commuter(&self) -> bool {
        self.kind.eq_ignore_ascii_case(COMMUTER_TYPE)
    }
}

/// Nearest facility for a property, with routed distance (km) and duration (min).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityMatch {
    #[serde(flatten)]
    pub facility: Facility,
    pub distance: f64,
    pub duration: i64,
}

pub fn load_facilities(path: &Path) -> Result<Vec<Facility>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read facility list {}", path.display()))?;
    let facilities: Vec<Facility> = serde_json::from_slice(&bytes)
        .with_context(|| format!("facility list {} is not valid JSON", path.display()))?;
    Ok(facilities)
}
