use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::facility::FacilityMatch;
use super::listing::Point;

/// Signed contribution of each ranking factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFactors {
    pub ber: i64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub floor_area: i64,
    pub distance: i64,
    pub transport: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<i64>,
    pub price: i64,
    pub price_per_square_meter: i64,
    #[serde(rename = "type")]
    pub property_type: i64,
}

impl ScoreFactors {
    pub fn sum(&self) -> i64 {
        self.ber
            + self.bedrooms
            + self.bathrooms
            + self.floor_area
            + self.distance
            + self.transport
            + self.store.unwrap_or_default()
            + self.price
            + self.price_per_square_meter
            + self.property_type
    }
}

/// Factors frozen together with their total. Built only from a complete
/// set of factors, so the total can never drift from the parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    #[serde(flatten)]
    factors: ScoreFactors,
    total: i64,
}

impl Scoring {
    pub fn factors(&self) -> &ScoreFactors {
        &self.factors
    }

    pub fn total(&self) -> i64 {
        self.total
    }
}

impl From<ScoreFactors> for Scoring {
    fn from(factors: ScoreFactors) -> Self {
        let total = factors.sum();
        Scoring { factors, total }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProperty {
    pub id: String,
    pub title: Option<String>,
    pub property_type: Option<String>,
    pub image: Option<String>,
    pub floor_area: i64,
    pub point: Point,
    pub seo_friendly_path: Option<String>,
    pub abbreviated_price: Option<String>,
    pub publish_date: Option<Value>,
    pub ber: String,
    pub lat: f64,
    pub lng: f64,
    pub price: i64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub price_per_square_meter: i64,
    pub distance: f64,
    pub transport: FacilityMatch,
    pub store: Option<FacilityMatch>,
    pub scoring: Scoring,
}
