pub mod cache;
pub mod config;
pub mod daft;
pub mod geo;
pub mod logger;
pub mod models;
pub mod producer;
pub mod routing;
