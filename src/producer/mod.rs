pub mod aggregator;
pub mod calculations;
pub mod collector;
pub mod nearest;
pub mod ranking_producer;
pub mod scorer;

pub use ranking_producer::{RankingProducer, RunSummary};
