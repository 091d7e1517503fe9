use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::listing::RawListing;

#[derive(Debug, Serialize)]
struct BatchOut<'a> {
    properties: &'a [RawListing],
}

#[derive(Debug, Deserialize)]
struct BatchIn {
    #[serde(default)]
    properties: Vec<Value>,
}

/// Raw listing snapshots, one `<region>.json` file per collected region.
#[derive(Debug, Clone)]
pub struct BatchStore {
    dir: PathBuf,
}

impl BatchStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<BatchStore> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create batch directory {}", dir.display()))?;
        Ok(BatchStore { dir })
    }

    pub fn path(&self, region: &str) -> PathBuf {
        self.dir.join(format!("{region}.json"))
    }

    pub fn write(&self, region: &str, listings: &[RawListing]) -> Result<PathBuf> {
        let path = self.path(region);
        let json = serde_json::to_vec_pretty(&BatchOut {
            properties: listings,
        })?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Every batch on disk, ordered by file name. Unparseable files and
    /// entries are logged and skipped.
    pub fn load_all(&self) -> Result<Vec<Vec<RawListing>>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)
            .with_context(|| format!("failed to list {}", self.dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().map_or(false, |ext| ext == "json"))
            .collect();
        paths.sort();

        let mut batches = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(batch) = read_batch(&path)? {
                batches.push(batch);
            }
        }
        Ok(batches)
    }
}

fn read_batch(path: &Path) -> Result<Option<Vec<RawListing>>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let batch: BatchIn = match serde_json::from_slice(&bytes) {
        Ok(batch) => batch,
        Err(e) => {
            warn!("Skipping malformed batch file {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    let mut listings = Vec::with_capacity(batch.properties.len());
    for value in batch.properties {
        if value.is_null() {
            continue;
        }
        match serde_json::from_value::<RawListing>(value) {
            Ok(listing) => listings.push(listing),
            Err(e) => warn!("Skipping listing in {}: {}", path.display(), e),
        }
    }
    debug!("Loaded {} listings from {}", listings.len(), path.display());
    Ok(Some(listings))
}
