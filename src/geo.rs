use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Coordinates {
        Coordinates { lat, lng }
    }
}

/// Great-circle distance in kilometers using the spherical law of cosines.
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    if lat1 == lat2 && lng1 == lng2 {
        return 0.0;
    }

    let radlat1 = lat1.to_radians();
    let radlat2 = lat2.to_radians();
    let radtheta = (lng1 - lng2).to_radians();

    let mut dist = radlat1.sin() * radlat2.sin() + radlat1.cos() * radlat2.cos() * radtheta.cos();
    // Floating point can push the cosine slightly above 1
    if dist > 1.0 {
        dist = 1.0;
    }

    let degrees = dist.acos().to_degrees();
    degrees * 60.0 * 1.1515 * 1.609344
}

pub fn distance_between(from: Coordinates, to: Coordinates) -> f64 {
    distance(from.lat, from.lng, to.lat, to.lng)
}

/// Distance from the configured city-center reference point.
pub fn distance_from_reference(config: &Config, lat: f64, lng: f64) -> f64 {
    distance(lat, lng, config.reference_lat, config.reference_lng)
}
