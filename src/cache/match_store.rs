use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::models::facility::FacilityMatch;

/// Durable key-value store of nearest-facility matches, one JSON file per
/// property id. Entries are written once and never expire.
#[derive(Debug, Clone)]
pub struct MatchStore {
    dir: PathBuf,
}

impl MatchStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<MatchStore> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create cache directory {}", dir.display()))?;
        Ok(MatchStore { dir })
    }

    fn path(&self, property_id: &str) -> PathBuf {
        let key: String = property_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{key}.json"))
    }

    /// Unreadable entries are reported and treated as missing.
    pub fn get(&self, property_id: &str) -> Result<Option<FacilityMatch>> {
        let path = self.path(property_id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(facility_match) => Ok(Some(facility_match)),
            Err(e) => {
                warn!("Ignoring malformed cache entry {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    /// Stores `facility_match` unless a valid entry already exists.
    /// Returns whether anything was written.
    pub fn put(&self, property_id: &str, facility_match: &FacilityMatch) -> Result<bool> {
        if self.get(property_id)?.is_some() {
            return Ok(false);
        }

        let path = self.path(property_id);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(facility_match)?;
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("failed to move cache entry to {}", path.display()))?;
        Ok(true)
    }
}
