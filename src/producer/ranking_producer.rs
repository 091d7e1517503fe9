use anyhow::{Context, Result};
use log::info;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use super::aggregator::aggregate;
use super::collector::collect_region;
use super::nearest::{FacilityPolicy, NearestFacilityResolver};
use super::scorer::PropertyScorer;
use crate::cache::CacheLayout;
use crate::config::Config;
use crate::daft::daft_client::DaftClient;
use crate::daft::ListingSource;
use crate::models::facility::{load_facilities, Facility};
use crate::models::property::ScoredProperty;
use crate::routing::openroute_client::OpenRouteServiceClient;
use crate::routing::RoutingService;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub regions_collected: usize,
    pub listings: usize,
    pub scored: usize,
    pub skipped: usize,
    pub output: PathBuf,
}

pub struct RankingProducer;

impl RankingProducer {
    /// Runs the pipeline against daft.ie and openrouteservice.
    pub async fn run(config: &Arc<Config>, skip_collection: bool) -> Result<RunSummary> {
        let source = DaftClient::new(config.clone())?;
        let routing: Arc<dyn RoutingService> = Arc::new(OpenRouteServiceClient::new(config));
        let transports = load_facilities(Path::new(&config.transports_path))?;
        let stores = load_facilities(Path::new(&config.stores_path))?;
        info!(
            "Loaded {} transport stations and {} stores",
            transports.len(),
            stores.len()
        );

        Self::run_with(config, &source, routing, transports, stores, skip_collection).await
    }

    /// Collect -> aggregate -> score -> write, one step at a time.
    pub async fn run_with(
        config: &Arc<Config>,
        source: &dyn ListingSource,
        routing: Arc<dyn RoutingService>,
        transports: Vec<Facility>,
        stores: Vec<Facility>,
        skip_collection: bool,
    ) -> Result<RunSummary> {
        info!("Starting RankingProducer run");
        let start = Instant::now();

        let cache = CacheLayout::open(&config.cache_path())?;
        fs::create_dir_all(&config.output_folder).with_context(|| {
            format!("failed to create output folder {}", config.output_folder)
        })?;

        let mut summary = RunSummary::default();

        if skip_collection {
            info!("Skipping collection, scoring cached listings only");
        } else {
            for region in &config.regions {
                collect_region(source, &cache.listings, region, config.max_pages).await?;
                summary.regions_collected += 1;
            }
        }

        let listings = aggregate(&cache.listings)?;
        summary.listings = listings.len();

        let throttle = config.routing_delay();
        let scorer = PropertyScorer::new(
            config.clone(),
            NearestFacilityResolver::new(
                routing.clone(),
                cache.transport.clone(),
                FacilityPolicy::Transport,
                throttle,
            ),
            NearestFacilityResolver::new(
                routing,
                cache.store.clone(),
                FacilityPolicy::Store,
                throttle,
            ),
            transports,
            stores,
        );

        let mut properties: Vec<ScoredProperty> = Vec::new();
        for listing in &listings {
            if let Some(property) = scorer.score(listing).await? {
                properties.push(property);
            }
        }
        summary.scored = properties.len();
        summary.skipped = summary.listings - summary.scored;

        if config.sort_by_score {
            properties.sort_by_key(|p| Reverse(p.scoring.total()));
        }

        summary.output = config.output_path();
        write_output(&summary.output, &properties)?;

        info!(
            "{} properties listed ({} skipped) in {}",
            summary.scored,
            summary.skipped,
            humantime::format_duration(std::time::Duration::from_secs(
                start.elapsed().as_secs()
            ))
        );
        Ok(summary)
    }
}

fn write_output(path: &Path, properties: &[ScoredProperty]) -> Result<()> {
    let json = serde_json::to_vec_pretty(properties)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
