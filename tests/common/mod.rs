#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use daftrank::config::{create_test_config, Config};
use daftrank::daft::{ListingPage, ListingSource};
use daftrank::geo::Coordinates;
use daftrank::models::facility::Facility;
use daftrank::models::listing::RawListing;
use daftrank::routing::{RouteSummary, RoutingService, TravelMode};

pub fn test_config(root: &Path) -> Config {
    let mut config = create_test_config();
    config.cache_folder = root.join("cache").display().to_string();
    config.output_folder = root.join("output").display().to_string();
    // 1 ms between routing calls
    config.openrouteservice_rpm_limit = 60_000;
    config
}

pub fn listing_json(id: u64) -> Value {
    json!({
        "id": id,
        "title": format!("{id} Oak Avenue, Dublin 1"),
        "price": "€400,000",
        "abbreviatedPrice": "€400k",
        "floorArea": { "value": "120", "unit": "METRES_SQUARED" },
        "ber": { "rating": "B2" },
        "numBedrooms": "3 Bed",
        "numBathrooms": "2 Bath",
        "propertyType": "Semi-D",
        "seoFriendlyPath": format!("/for-sale/house-{id}"),
        "point": { "type": "Point", "coordinates": [-6.2560, 53.3520] },
        "media": { "images": [{ "size300x200": format!("https://img/{id}.jpg") }] },
        "publishDate": 1700000000000u64
    })
}

pub fn listing(id: u64) -> RawListing {
    serde_json::from_value(listing_json(id)).unwrap()
}

pub fn bare_listing(id: u64) -> RawListing {
    serde_json::from_value(json!({ "id": id })).unwrap()
}

pub fn transports() -> Vec<Facility> {
    vec![
        Facility {
            name: String::from("Connolly"),
            kind: String::from("LUAS"),
            lat: 53.3509,
            lng: -6.2500,
        },
        Facility {
            name: String::from("Howth"),
            kind: String::from("DART"),
            lat: 53.3886,
            lng: -6.0740,
        },
    ]
}

pub fn stores() -> Vec<Facility> {
    vec![Facility {
        name: String::from("Tesco Phibsborough"),
        kind: String::from("tesco"),
        lat: 53.3600,
        lng: -6.2700,
    }]
}

/// Serves prepared pages per region and records every request.
#[derive(Default)]
pub struct FakeListingSource {
    pages: HashMap<String, Vec<Vec<RawListing>>>,
    always_full: bool,
    pub requests: Mutex<Vec<(String, u32)>>,
}

impl FakeListingSource {
    pub fn with_region(mut self, region: &str, pages: Vec<Vec<RawListing>>) -> Self {
        self.pages.insert(region.to_string(), pages);
        self
    }

    pub fn always_full() -> Self {
        FakeListingSource {
            always_full: true,
            ..Default::default()
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

pub fn page_of(first_id: u64, size: usize) -> Vec<RawListing> {
    (0..size as u64).map(|i| bare_listing(first_id + i)).collect()
}

#[async_trait]
impl ListingSource for FakeListingSource {
    async fn fetch_page(&self, region: &str, page: u32) -> Result<ListingPage> {
        self.requests
            .lock()
            .unwrap()
            .push((region.to_string(), page));

        if self.always_full {
            return Ok(ListingPage {
                listings: page_of(page as u64 * 100, 20),
                total_results: None,
            });
        }

        let listings = self
            .pages
            .get(region)
            .and_then(|pages| pages.get(page as usize - 1))
            .cloned()
            .unwrap_or_default();
        Ok(ListingPage {
            listings,
            total_results: Some(0),
        })
    }
}

/// Walking takes 5 minutes, driving 10.
#[derive(Default)]
pub struct FakeRouting {
    pub calls: AtomicUsize,
    pub modes: Mutex<Vec<TravelMode>>,
}

impl FakeRouting {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutingService for FakeRouting {
    async fn route(
        &self,
        mode: TravelMode,
        _from: Coordinates,
        _to: Coordinates,
    ) -> Result<RouteSummary> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.modes.lock().unwrap().push(mode);
        Ok(match mode {
            TravelMode::Walking => RouteSummary {
                distance: 412.0,
                duration: 300.0,
            },
            TravelMode::Driving => RouteSummary {
                distance: 2460.0,
                duration: 610.0,
            },
        })
    }
}

pub struct FailingRouting;

#[async_trait]
impl RoutingService for FailingRouting {
    async fn route(
        &self,
        _mode: TravelMode,
        _from: Coordinates,
        _to: Coordinates,
    ) -> Result<RouteSummary> {
        Err(anyhow!("openrouteservice responded with error 429"))
    }
}
