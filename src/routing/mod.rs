pub mod openroute_client;

use anyhow::Result;
use async_trait::async_trait;

use crate::geo::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Walking,
    Driving,
}

impl TravelMode {
    pub fn profile(&self) -> &'static str {
        match self {
            TravelMode::Walking => "foot-walking",
            TravelMode::Driving => "driving-car",
        }
    }
}

/// Route summary in the units the routing service uses: meters and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance: f64,
    pub duration: f64,
}

#[async_trait]
pub trait RoutingService: Send + Sync {
    async fn route(
        &self,
        mode: TravelMode,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<RouteSummary>;
}
