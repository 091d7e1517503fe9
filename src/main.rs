use std::env;
use std::sync::Arc;

use anyhow::Result;
use daftrank::config::{self, Config};
use daftrank::logger::setup_logger;
use daftrank::producer::RankingProducer;
use log::{error, info};

/// Passing this token scores the cached listings without collecting.
const SKIP_COLLECTION_ARG: &str = "skip";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    setup_logger()?;

    let skip_collection = env::args().skip(1).any(|arg| arg == SKIP_COLLECTION_ARG);

    let config: Arc<Config> = match config::read_config() {
        Ok(config) => match config.validate(!skip_collection) {
            Ok(()) => Arc::new(config),
            Err(err) => {
                error!("invalid config: {err}");
                std::process::exit(1);
            }
        },
        Err(err) => {
            error!("failed to read config: {err:#}");
            std::process::exit(1);
        }
    };

    match RankingProducer::run(&config, skip_collection).await {
        Ok(summary) => {
            info!(
                "Done: {} regions, {} listings, {} scored -> {}",
                summary.regions_collected,
                summary.listings,
                summary.scored,
                summary.output.display()
            );
            Ok(())
        }
        Err(err) => {
            error!("Run failed: {:?}", err);
            std::process::exit(1);
        }
    }
}
