use anyhow::Result;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

use super::calculations::{round_half_up, round_to_tenth};
use crate::cache::match_store::MatchStore;
use crate::geo::{distance_between, Coordinates};
use crate::models::facility::{Facility, FacilityMatch};
use crate::routing::{RoutingService, TravelMode};

pub const COMMUTER_DRIVE_RADIUS_KM: f64 = 10.0;
pub const WALKING_RADIUS_KM: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacilityPolicy {
    /// Drive to commuter stations within 10 km, walk to anything within 2 km.
    Transport,
    /// Always drive to the nearest store.
    Store,
}

impl FacilityPolicy {
    pub fn travel_mode(&self, nearest: &Facility, distance_km: f64) -> Option<TravelMode> {
        match self {
            FacilityPolicy::Store => Some(TravelMode::Driving),
            FacilityPolicy::Transport => {
                if nearest.is_commuter() && distance_km <= COMMUTER_DRIVE_RADIUS_KM {
                    Some(TravelMode::Driving)
                } else if distance_km <= WALKING_RADIUS_KM {
                    Some(TravelMode::Walking)
                } else {
                    None
                }
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FacilityPolicy::Transport => "transport",
            FacilityPolicy::Store => "store",
        }
    }
}

/// Closest facility as the crow flies. Ties keep list order.
pub fn nearest_facility(origin: Coordinates, facilities: &[Facility]) -> Option<(&Facility, f64)> {
    facilities
        .iter()
        .map(|facility| (facility, distance_between(origin, facility.coordinates())))
        .fold(None, |best, (facility, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((facility, distance)),
        })
}

/// Resolves a property to its nearest facility, asking the routing service
/// for the real travel distance and caching the answer per property id.
pub struct NearestFacilityResolver {
    routing: Arc<dyn RoutingService>,
    cache: MatchStore,
    policy: FacilityPolicy,
    throttle: Duration,
}

impl NearestFacilityResolver {
    pub fn new(
        routing: Arc<dyn RoutingService>,
        cache: MatchStore,
        policy: FacilityPolicy,
        throttle: Duration,
    ) -> NearestFacilityResolver {
        NearestFacilityResolver {
            routing,
            cache,
            policy,
            throttle,
        }
    }

    /// Returns `Ok(None)` when no facility qualifies. Routing errors are
    /// returned as-is, there is no retry.
    pub async fn resolve(
        &self,
        property_id: &str,
        lat: f64,
        lng: f64,
        facilities: &[Facility],
    ) -> Result<Option<FacilityMatch>> {
        if let Some(cached) = self.cache.get(property_id)? {
            return Ok(Some(cached));
        }
        debug!(
            "No {} cache for property {}, calculating",
            self.policy.label(),
            property_id
        );

        let origin = Coordinates::new(lat, lng);
        let (nearest, straight_line) = match nearest_facility(origin, facilities) {
            Some(found) => found,
            None => return Ok(None),
        };

        let mode = match self.policy.travel_mode(nearest, straight_line) {
            Some(mode) => mode,
            None => {
                debug!(
                    "Property {} is {:.1} km from {}, too far",
                    property_id, straight_line, nearest.name
                );
                return Ok(None);
            }
        };

        let route = self
            .routing
            .route(mode, origin, nearest.coordinates())
            .await?;

        let facility_match = FacilityMatch {
            facility: nearest.clone(),
            distance: round_to_tenth(route.distance / 1000.0),
            duration: round_half_up(route.duration / 60.0),
        };

        self.cache.put(property_id, &facility_match)?;
        info!(
            "Closest {} for {}: {} ({}), {} min by {}",
            self.policy.label(),
            property_id,
            nearest.name,
            nearest.kind,
            facility_match.duration,
            mode.profile()
        );

        tokio::time::sleep(self.throttle).await;

        Ok(Some(facility_match))
    }
}
