use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use super::{RouteSummary, RoutingService, TravelMode};
use crate::config::Config;
use crate::geo::Coordinates;

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    summary: Summary,
}

// openrouteservice omits both fields when start and end coincide
#[derive(Debug, Deserialize)]
struct Summary {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Clone)]
pub struct OpenRouteServiceClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenRouteServiceClient {
    pub fn new(config: &Config) -> OpenRouteServiceClient {
        OpenRouteServiceClient {
            client: reqwest::Client::new(),
            base_url: config.routing_base_url.trim_end_matches('/').to_string(),
            api_key: config.openrouteservice_api_key.clone(),
        }
    }
}

fn lng_lat(point: Coordinates) -> String {
    format!("{},{}", point.lng, point.lat)
}

#[async_trait]
impl RoutingService for OpenRouteServiceClient {
    async fn route(
        &self,
        mode: TravelMode,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<RouteSummary> {
        let url = format!("{}/v2/directions/{}", self.base_url, mode.profile());
        let params: Vec<(&str, String)> = vec![
            ("api_key", self.api_key.clone()),
            ("start", lng_lat(from)),
            ("end", lng_lat(to)),
        ];
        debug!("Requesting {} route {:?} -> {:?}", mode.profile(), from, to);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("Failed to reach openrouteservice")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "openrouteservice responded with error {}: {}",
                status,
                body
            ));
        }

        let parsed: DirectionsResponse = response
            .json()
            .await
            .context("Failed to deserialize openrouteservice response")?;

        let summary = &parsed
            .features
            .first()
            .ok_or_else(|| anyhow!("openrouteservice returned no route"))?
            .properties
            .summary;

        Ok(RouteSummary {
            distance: summary.distance,
            duration: summary.duration,
        })
    }
}
