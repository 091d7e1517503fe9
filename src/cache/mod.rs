pub mod batch_store;
pub mod match_store;

use anyhow::Result;
use std::path::Path;

use batch_store::BatchStore;
use match_store::MatchStore;

/// The three stores living under the cache folder.
#[derive(Debug, Clone)]
pub struct CacheLayout {
    pub listings: BatchStore,
    pub transport: MatchStore,
    pub store: MatchStore,
}

impl CacheLayout {
    pub fn open(root: &Path) -> Result<CacheLayout> {
        Ok(CacheLayout {
            listings: BatchStore::open(root.join("listings"))?,
            transport: MatchStore::open(root.join("transport"))?,
            store: MatchStore::open(root.join("store"))?,
        })
    }
}
