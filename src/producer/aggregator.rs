use anyhow::Result;
use log::info;
use std::collections::HashSet;

use crate::cache::batch_store::BatchStore;
use crate::models::listing::RawListing;

/// Flattens batches keeping the first listing seen for each id.
pub fn dedup(batches: Vec<Vec<RawListing>>) -> Vec<RawListing> {
    let mut seen: HashSet<String> = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|listing| seen.insert(listing.id.clone()))
        .collect()
}

pub fn aggregate(batches: &BatchStore) -> Result<Vec<RawListing>> {
    let loaded = batches.load_all()?;
    let total: usize = loaded.iter().map(Vec::len).sum();
    let unique = dedup(loaded);
    info!(
        "Aggregated {} listings, {} after removing duplicates",
        total,
        unique.len()
    );
    Ok(unique)
}
