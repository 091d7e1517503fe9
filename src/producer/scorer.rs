use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::sync::Arc;

use super::calculations::{
    calculate_scoring, price_per_square_meter, ScoreInputs, MAX_FLOOR_AREA, MIN_FLOOR_AREA,
};
use super::nearest::NearestFacilityResolver;
use crate::config::Config;
use crate::daft::helpers::digits_only;
use crate::geo::distance_from_reference;
use crate::models::facility::Facility;
use crate::models::listing::{Point, RawListing, SQUARE_METRES_UNIT};
use crate::models::property::ScoredProperty;

lazy_static! {
    static ref BER_RATING: Regex = Regex::new(r"^[A-G][0-9]").unwrap();
}

/// Listing fields that passed the eligibility checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub listing: &'a RawListing,
    pub price: i64,
    pub floor_area: f64,
    pub ber: &'a str,
    pub point: &'a Point,
    pub lat: f64,
    pub lng: f64,
    pub image: Option<String>,
    pub bedrooms: i64,
    pub bathrooms: i64,
}

pub fn parse_price(price: &str) -> Option<i64> {
    digits_only(price).parse::<i64>().ok().filter(|p| *p > 0)
}

/// Count from free text like "3 Bed". Absent or digitless text counts as 0.
pub fn parse_count(text: Option<&str>) -> i64 {
    text.and_then(|t| digits_only(t).parse().ok()).unwrap_or(0)
}

/// Checks everything that can be decided from the listing alone.
pub fn eligible<'a>(config: &Config, listing: &'a RawListing) -> Option<Candidate<'a>> {
    let price = parse_price(listing.price.as_deref()?)?;
    if price < config.minimum_price as i64 || price > config.maximum_price as i64 {
        return None;
    }

    let floor_area = listing.floor_area.as_ref()?;
    if floor_area.unit.as_deref() != Some(SQUARE_METRES_UNIT)
        || !floor_area.value.is_finite()
        || !(MIN_FLOOR_AREA..=MAX_FLOOR_AREA).contains(&floor_area.value)
    {
        return None;
    }

    let ber = listing.ber.as_ref()?.rating.as_deref()?;
    if !BER_RATING.is_match(ber) {
        return None;
    }

    let media = listing.media.as_ref()?;
    let first_image = media.images.first()?;

    let point = listing.point.as_ref()?;
    let (lat, lng) = point.lat_lng()?;

    let bedrooms = parse_count(listing.num_bedrooms.as_deref());
    let bathrooms = parse_count(listing.num_bathrooms.as_deref());
    if bedrooms < config.minimum_bedrooms as i64 || bathrooms < config.minimum_bathrooms as i64 {
        return None;
    }

    Some(Candidate {
        listing,
        price,
        floor_area: floor_area.value,
        ber,
        point,
        lat,
        lng,
        image: first_image.size300x200.clone(),
        bedrooms,
        bathrooms,
    })
}

pub struct PropertyScorer {
    config: Arc<Config>,
    transport: NearestFacilityResolver,
    store: NearestFacilityResolver,
    transports: Vec<Facility>,
    stores: Vec<Facility>,
}

impl PropertyScorer {
    pub fn new(
        config: Arc<Config>,
        transport: NearestFacilityResolver,
        store: NearestFacilityResolver,
        transports: Vec<Facility>,
        stores: Vec<Facility>,
    ) -> PropertyScorer {
        PropertyScorer {
            config,
            transport,
            store,
            transports,
            stores,
        }
    }

    /// Scores one listing. `Ok(None)` means the listing is not eligible.
    pub async fn score(&self, listing: &RawListing) -> Result<Option<ScoredProperty>> {
        let candidate = match eligible(&self.config, listing) {
            Some(c) => c,
            None => {
                debug!("Listing {} is not eligible", listing.id);
                return Ok(None);
            }
        };

        let transport = match self
            .transport
            .resolve(&listing.id, candidate.lat, candidate.lng, &self.transports)
            .await?
        {
            Some(t) => t,
            None => {
                debug!("Listing {} has no transport nearby", listing.id);
                return Ok(None);
            }
        };

        let store = self
            .store
            .resolve(&listing.id, candidate.lat, candidate.lng, &self.stores)
            .await?;

        let floor_area = candidate.floor_area as i64;
        let ppsm = price_per_square_meter(candidate.price, candidate.floor_area);
        let distance = distance_from_reference(&self.config, candidate.lat, candidate.lng);

        let scoring = match calculate_scoring(&ScoreInputs {
            ber_rating: candidate.ber,
            bedrooms: candidate.bedrooms,
            bathrooms: candidate.bathrooms,
            floor_area,
            distance_km: distance,
            transport_minutes: transport.duration,
            store_minutes: store.as_ref().map(|s| s.duration),
            price: candidate.price,
            price_midpoint: self.config.price_midpoint(),
            price_per_square_meter: ppsm,
            property_type: listing.property_type.as_deref().unwrap_or_default(),
        }) {
            Some(s) => s,
            None => return Ok(None),
        };

        Ok(Some(ScoredProperty {
            id: listing.id.clone(),
            title: listing.title.clone(),
            property_type: listing.property_type.clone(),
            image: candidate.image,
            floor_area,
            point: candidate.point.clone(),
            seo_friendly_path: listing.seo_friendly_path.clone(),
            abbreviated_price: listing.abbreviated_price.clone(),
            publish_date: listing.publish_date.clone(),
            ber: candidate.ber.to_string(),
            lat: candidate.lat,
            lng: candidate.lng,
            price: candidate.price,
            bedrooms: candidate.bedrooms,
            bathrooms: candidate.bathrooms,
            price_per_square_meter: ppsm,
            distance,
            transport,
            store,
            scoring,
        }))
    }
}
