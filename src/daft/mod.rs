pub mod daft_client;
pub mod helpers;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::models::listing::RawListing;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("__NEXT_DATA__ block not found in search page")]
    MissingNextData,
    #[error("search page payload is not valid: {0}")]
    JsonParse(String),
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub listings: Vec<RawListing>,
    pub total_results: Option<u64>,
}

/// One page of search results for a region. Pages start at 1.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_page(&self, region: &str, page: u32) -> Result<ListingPage>;
}
