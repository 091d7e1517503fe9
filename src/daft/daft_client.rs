use anyhow::{Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue};
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::helpers::create_search_params;
use super::{CollectorError, ListingPage, ListingSource};
use crate::config::Config;
use crate::models::listing::RawListing;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

lazy_static! {
    static ref NEXT_DATA: Selector =
        Selector::parse(r#"script#__NEXT_DATA__[type="application/json"]"#)
            .expect("static selector is valid");
}

#[derive(Debug, Deserialize)]
struct NextData {
    props: NextProps,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NextProps {
    page_props: PageProps,
}

// Decoded one at a time in extract_listings
#[derive(Debug, Deserialize)]
struct PageProps {
    listings: Vec<Value>,
    #[serde(default)]
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paging {
    #[serde(default)]
    total_results: Option<u64>,
}

/// Pulls the listings out of the `__NEXT_DATA__` block of a search page.
pub fn extract_listings(html: &str) -> Result<ListingPage, CollectorError> {
    let document = Html::parse_document(html);
    let script = document
        .select(&NEXT_DATA)
        .next()
        .ok_or(CollectorError::MissingNextData)?;
    let payload: String = script.text().collect();

    let data: NextData =
        serde_json::from_str(&payload).map_err(|e| CollectorError::JsonParse(e.to_string()))?;

    let page_props = data.props.page_props;
    let mut listings = Vec::with_capacity(page_props.listings.len());
    for mut envelope in page_props.listings {
        let raw = envelope
            .get_mut("listing")
            .map(Value::take)
            .unwrap_or(Value::Null);
        if raw.is_null() {
            warn!("Skipping search result without a listing");
            continue;
        }
        match serde_json::from_value::<RawListing>(raw) {
            Ok(listing) => listings.push(listing),
            Err(e) => warn!("Skipping unreadable listing: {}", e),
        }
    }

    Ok(ListingPage {
        listings,
        total_results: page_props.paging.and_then(|p| p.total_results),
    })
}

#[derive(Debug, Clone)]
pub struct DaftClient {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl DaftClient {
    pub fn new(config: Arc<Config>) -> Result<DaftClient> {
        let mut headers: HeaderMap = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build daft.ie http client")?;

        Ok(DaftClient { client, config })
    }

    fn search_url(&self, region: &str) -> String {
        format!(
            "{}/property-for-sale/{}/houses",
            self.config.listing_base_url.trim_end_matches('/'),
            region
        )
    }
}

#[async_trait]
impl ListingSource for DaftClient {
    async fn fetch_page(&self, region: &str, page: u32) -> Result<ListingPage> {
        let url = self.search_url(region);
        let params = create_search_params(&self.config, page);
        debug!("Fetching {} page {}", url, page);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("failed to fetch {region} page {page}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectorError::Status {
                url,
                status: status.as_u16(),
            }
            .into());
        }

        let html = response
            .text()
            .await
            .with_context(|| format!("failed to read {region} page {page}"))?;

        let listing_page =
            extract_listings(&html).with_context(|| format!("{region} page {page}"))?;
        Ok(listing_page)
    }
}
