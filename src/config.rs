use anyhow::{Context, Result};
use dotenvy::dotenv;
use log::{info, warn};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
/// Misspelling found in older .env files, still honoured.
const LEGACY_MINIMUM_PRICE_ENV: &str = "MINUMUM_PRICE";

/// O'Connell Bridge, Dublin
const DEFAULT_REFERENCE_LAT: f64 = 53.347256812999525;
const DEFAULT_REFERENCE_LNG: f64 = -6.259080753374189;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{key} must be a number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("minimum price {min} is greater than maximum price {max}")]
    InvalidPriceRange { min: u32, max: u32 },
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("no regions configured for collection")]
    NoRegions,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub cache_folder: String,
    pub output_folder: String,
    pub output_file: String,
    pub openrouteservice_api_key: String,
    pub openrouteservice_rpm_limit: u32,
    pub minimum_price: u32,
    pub maximum_price: u32,
    pub minimum_bedrooms: u32,
    pub minimum_bathrooms: u32,
    pub regions: Vec<String>,
    pub transports_path: String,
    pub stores_path: String,
    pub max_pages: u32,
    pub listing_base_url: String,
    pub routing_base_url: String,
    pub reference_lat: f64,
    pub reference_lng: f64,
    pub sort_by_score: bool,
}

impl Default for Config {
    fn default() -> Self {
        let output_folder = env::var("HOME")
            .map(|home| format!("{home}/files"))
            .unwrap_or_else(|_| String::from("files"));

        Config {
            cache_folder: String::from("cache"),
            output_folder,
            output_file: String::from("daft.json"),
            openrouteservice_api_key: String::new(),
            openrouteservice_rpm_limit: 40,
            minimum_price: 0,
            maximum_price: 0,
            minimum_bedrooms: 0,
            minimum_bathrooms: 0,
            regions: vec![String::from("dublin-city")],
            transports_path: String::from("transports.json"),
            stores_path: String::from("stores.json"),
            max_pages: 500,
            listing_base_url: String::from("https://www.daft.ie"),
            routing_base_url: String::from("https://api.openrouteservice.org"),
            reference_lat: DEFAULT_REFERENCE_LAT,
            reference_lng: DEFAULT_REFERENCE_LNG,
            sort_by_score: false,
        }
    }
}

impl Config {
    pub fn cache_path(&self) -> PathBuf {
        PathBuf::from(&self.cache_folder)
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_folder).join(&self.output_file)
    }

    pub fn price_midpoint(&self) -> f64 {
        (self.minimum_price as f64 + self.maximum_price as f64) / 2.0
    }

    /// Delay that keeps routing lookups under the requests-per-minute budget.
    pub fn routing_delay(&self) -> std::time::Duration {
        let rpm = self.openrouteservice_rpm_limit.max(1) as u64;
        std::time::Duration::from_millis(60_000 / rpm)
    }

    /// Overrides file values with environment-style variables.
    /// `lookup` is `std::env::var` in production and a map in tests.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("CACHE_FOLDER") {
            self.cache_folder = value;
        }
        if let Some(value) = lookup("OUTPUT_FOLDER") {
            self.output_folder = value;
        }
        if let Some(value) = lookup("OPENROUTESERVICE_API_KEY") {
            self.openrouteservice_api_key = value;
        }
        if let Some(value) = lookup("OPENROUTESERVICE_RPM_LIMIT") {
            self.openrouteservice_rpm_limit = parse_number("OPENROUTESERVICE_RPM_LIMIT", &value)?;
        }
        if let Some(value) = lookup(LEGACY_MINIMUM_PRICE_ENV) {
            warn!("{LEGACY_MINIMUM_PRICE_ENV} is deprecated, use MINIMUM_PRICE");
            self.minimum_price = parse_number(LEGACY_MINIMUM_PRICE_ENV, &value)?;
        }
        if let Some(value) = lookup("MINIMUM_PRICE") {
            self.minimum_price = parse_number("MINIMUM_PRICE", &value)?;
        }
        if let Some(value) = lookup("MAXIMUM_PRICE") {
            self.maximum_price = parse_number("MAXIMUM_PRICE", &value)?;
        }
        if let Some(value) = lookup("MINIMUM_BEDROOMS") {
            self.minimum_bedrooms = parse_number("MINIMUM_BEDROOMS", &value)?;
        }
        if let Some(value) = lookup("MINIMUM_BATHROOMS") {
            self.minimum_bathrooms = parse_number("MINIMUM_BATHROOMS", &value)?;
        }
        Ok(())
    }

    pub fn validate(&self, collecting: bool) -> Result<(), ConfigError> {
        if self.openrouteservice_api_key.trim().is_empty() {
            return Err(ConfigError::Missing("OPENROUTESERVICE_API_KEY"));
        }
        if self.maximum_price == 0 {
            return Err(ConfigError::Missing("MAXIMUM_PRICE"));
        }
        if self.minimum_price > self.maximum_price {
            return Err(ConfigError::InvalidPriceRange {
                min: self.minimum_price,
                max: self.maximum_price,
            });
        }
        if self.openrouteservice_rpm_limit == 0 {
            return Err(ConfigError::NotPositive("OPENROUTESERVICE_RPM_LIMIT"));
        }
        if self.max_pages == 0 {
            return Err(ConfigError::NotPositive("max_pages"));
        }
        if collecting && self.regions.is_empty() {
            return Err(ConfigError::NoRegions);
        }
        Ok(())
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

pub fn create_test_config() -> Config {
    Config {
        cache_folder: String::from("cache"),
        output_folder: String::from("output"),
        output_file: String::from("daft.json"),
        openrouteservice_api_key: String::from("xxx"),
        openrouteservice_rpm_limit: 40,
        minimum_price: 300000,
        maximum_price: 600000,
        minimum_bedrooms: 0,
        minimum_bathrooms: 0,
        regions: vec![String::from("dublin-city")],
        transports_path: String::from("transports.json"),
        stores_path: String::from("stores.json"),
        max_pages: 500,
        listing_base_url: String::from("https://www.daft.ie"),
        routing_base_url: String::from("https://api.openrouteservice.org"),
        reference_lat: DEFAULT_REFERENCE_LAT,
        reference_lng: DEFAULT_REFERENCE_LNG,
        sort_by_score: false,
    }
}

/*
   Reads the optional TOML file pointed to by CONFIG_PATH, then applies
   environment overrides (.env included). Validation is left to the caller
   because it depends on whether collection runs.
*/
pub fn read_config() -> Result<Config> {
    dotenv().ok();

    let mut config = match env::var(CONFIG_PATH_ENV) {
        Ok(config_path) => {
            info!("Reading config from {}", config_path);
            let bytes = std::fs::read(&config_path)
                .with_context(|| format!("failed to read config file {config_path}"))?;
            toml::from_slice(&bytes)
                .with_context(|| format!("failed to parse config file {config_path}"))?
        }
        Err(_) => Config::default(),
    };

    config.apply_overrides(|key| env::var(key).ok())?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = create_test_config();
        config
            .apply_overrides(lookup(&[
                ("CACHE_FOLDER", "/tmp/cache"),
                ("MINIMUM_PRICE", "250000"),
                ("MAXIMUM_PRICE", " 550000 "),
                ("MINIMUM_BEDROOMS", "3"),
            ]))
            .unwrap();

        assert_eq!(config.cache_folder, "/tmp/cache");
        assert_eq!(config.minimum_price, 250000);
        assert_eq!(config.maximum_price, 550000);
        assert_eq!(config.minimum_bedrooms, 3);
        assert_eq!(config.price_midpoint(), 400000.0);
    }

    #[test]
    fn misspelled_minimum_price_is_accepted() {
        let mut config = create_test_config();
        config
            .apply_overrides(lookup(&[("MINUMUM_PRICE", "275000")]))
            .unwrap();
        assert_eq!(config.minimum_price, 275000);

        config
            .apply_overrides(lookup(&[
                ("MINUMUM_PRICE", "275000"),
                ("MINIMUM_PRICE", "325000"),
            ]))
            .unwrap();
        assert_eq!(config.minimum_price, 325000);
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let mut config = create_test_config();
        let err = config
            .apply_overrides(lookup(&[("MAXIMUM_PRICE", "lots")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "MAXIMUM_PRICE",
                value: String::from("lots")
            }
        );
    }

    #[test]
    fn missing_api_key_fails_validation() {
        let mut config = create_test_config();
        config.openrouteservice_api_key = String::from("  ");
        assert_eq!(
            config.validate(true),
            Err(ConfigError::Missing("OPENROUTESERVICE_API_KEY"))
        );
    }

    #[test]
    fn inverted_price_range_fails_validation() {
        let mut config = create_test_config();
        config.minimum_price = 700000;
        assert_eq!(
            config.validate(true),
            Err(ConfigError::InvalidPriceRange {
                min: 700000,
                max: 600000
            })
        );
    }

    #[test]
    fn regions_only_required_when_collecting() {
        let mut config = create_test_config();
        config.regions.clear();
        assert_eq!(config.validate(true), Err(ConfigError::NoRegions));
        assert_eq!(config.validate(false), Ok(()));
    }

    #[test]
    fn routing_delay_follows_rpm_limit() {
        let config = create_test_config();
        assert_eq!(config.routing_delay().as_millis(), 1500);
    }

    #[test]
    fn toml_values_fill_defaults() {
        let config: Config = toml::from_str(
            r#"
            openrouteservice_api_key = "key"
            maximum_price = 500000
            regions = ["dublin-city", "kildare"]
            sort_by_score = true
            "#,
        )
        .unwrap();

        assert_eq!(config.regions.len(), 2);
        assert!(config.sort_by_score);
        assert_eq!(config.max_pages, 500);
        assert_eq!(config.output_file, "daft.json");
    }
}
