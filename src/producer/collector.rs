use anyhow::Result;
use futures::stream::{self, Stream, TryStreamExt};
use log::{info, warn};

use crate::cache::batch_store::BatchStore;
use crate::daft::helpers::PAGE_SIZE;
use crate::daft::{ListingPage, ListingSource};
use crate::models::listing::RawListing;

/// Lazy stream of search pages for a region. Stops after the first short
/// page or after `max_pages` pages. Each call starts again from page 1.
pub fn listing_pages<'a>(
    source: &'a dyn ListingSource,
    region: &'a str,
    max_pages: u32,
) -> impl Stream<Item = Result<ListingPage>> + 'a {
    stream::try_unfold(Some(1u32), move |next_page| async move {
        match next_page {
            Some(page) => fetch_step(source, region, page, max_pages).await,
            None => Ok(None),
        }
    })
}

async fn fetch_step(
    source: &dyn ListingSource,
    region: &str,
    page: u32,
    max_pages: u32,
) -> Result<Option<(ListingPage, Option<u32>)>> {
    info!("Fetching {} page {}", region, page);
    let fetched = source.fetch_page(region, page).await?;
    if page == 1 {
        if let Some(total) = fetched.total_results {
            info!("{} has {} listings", region, total);
        }
    }

    let is_full = fetched.listings.len() >= PAGE_SIZE;
    let next = if !is_full {
        None
    } else if page >= max_pages {
        warn!(
            "Stopping {} after {} pages, upstream keeps returning full pages",
            region, page
        );
        None
    } else {
        Some(page + 1)
    };

    Ok(Some((fetched, next)))
}

/// Collects every listing of a region and snapshots them to the batch store.
pub async fn collect_region(
    source: &dyn ListingSource,
    batches: &BatchStore,
    region: &str,
    max_pages: u32,
) -> Result<Vec<RawListing>> {
    let pages = listing_pages(source, region, max_pages);
    futures::pin_mut!(pages);

    let mut listings: Vec<RawListing> = Vec::new();
    while let Some(page) = pages.try_next().await? {
        listings.extend(page.listings);
    }

    let path = batches.write(region, &listings)?;
    info!(
        "Collected {} listings for {} into {}",
        listings.len(),
        region,
        path.display()
    );
    Ok(listings)
}
