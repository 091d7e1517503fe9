use serde::de;
use serde::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_this_or_that::as_f64;

pub const SQUARE_METRES_UNIT: &str = "METRES_SQUARED";

/// Listing as published by daft.ie. Fields the pipeline never reads are
/// kept in `extra` so that batch files round-trip what the site returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    #[serde(deserialize_with = "id_int_or_string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_area: Option<FloorArea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ber: Option<Ber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_bedrooms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_bathrooms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviated_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_friendly_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorArea {
    #[serde(default, deserialize_with = "as_f64")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ber {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// GeoJSON point, coordinates are `[lng, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl Point {
    pub fn lat_lng(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_slice() {
            [lng, lat, ..] => Some((*lat, *lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, rename = "size300x200", skip_serializing_if = "Option::is_none")]
    pub size300x200: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// daft.ie sends numeric ids, older cache files may contain strings
fn id_int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => s,
        Value::Number(num) => num.to_string(),
        _ => return Err(de::Error::custom("listing id must be a number or string")),
    })
}
