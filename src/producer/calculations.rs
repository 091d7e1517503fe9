use crate::models::property::{ScoreFactors, Scoring};

pub const MIN_FLOOR_AREA: f64 = 100.0;
pub const MAX_FLOOR_AREA: f64 = 400.0;

const FLOOR_AREA_BASELINE: i64 = 150;
const PRICE_PER_SQUARE_METER_BASELINE: f64 = 5000.0;

/// Rounds halves towards positive infinity, so -2.5 becomes -2.
/// The ranking weights were tuned against this rounding.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Base points per BER letter grade.
fn ber_base(letter: char) -> Option<f64> {
    match letter {
        'A' => Some(200.0),
        'B' => Some(70.0),
        'C' => Some(0.0),
        'D' => Some(-50.0),
        'E' => Some(-100.0),
        'F' => Some(-150.0),
        'G' => Some(-200.0),
        _ => None,
    }
}

/// Bonus share of the base score for the BER digit.
fn ber_digit_bonus(digit: char) -> f64 {
    match digit {
        '1' => 0.20,
        '2' => 0.10,
        '3' => 0.05,
        _ => 0.0,
    }
}

/// Score for a rating like "B2". `None` if the letter is not A-G.
pub fn ber_score(rating: &str) -> Option<i64> {
    let mut chars = rating.chars();
    let base = ber_base(chars.next()?)?;
    let bonus = chars.next().map(ber_digit_bonus).unwrap_or_default();
    Some(round_half_up(base + base.abs() * bonus))
}

pub fn property_type_score(property_type: &str) -> i64 {
    match property_type {
        "Detached" => 100,
        "Semi-D" => 50,
        "Bungalow" => 30,
        _ => -100,
    }
}

pub fn price_per_square_meter(price: i64, floor_area: f64) -> i64 {
    (price as f64 / floor_area).ceil() as i64
}

pub fn floor_area_score(floor_area: i64) -> i64 {
    (floor_area - FLOOR_AREA_BASELINE) * 2
}

pub fn distance_score(distance_km: f64) -> i64 {
    -round_half_up(distance_km / 10.0)
}

pub fn transport_score(duration_min: i64) -> i64 {
    -round_half_up(duration_min as f64 * 3.0)
}

pub fn store_score(duration_min: i64) -> i64 {
    -round_half_up(duration_min as f64 * 2.0)
}

/// Rewards prices below the middle of the searched price range.
pub fn price_score(price: i64, price_midpoint: f64) -> i64 {
    round_half_up((price_midpoint - price as f64) / 1000.0)
}

pub fn price_per_square_meter_score(price_per_square_meter: i64) -> i64 {
    round_half_up((PRICE_PER_SQUARE_METER_BASELINE - price_per_square_meter as f64) / 100.0)
}

/// Everything the formula needs about one property.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreInputs<'a> {
    pub ber_rating: &'a str,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub floor_area: i64,
    pub distance_km: f64,
    pub transport_minutes: i64,
    pub store_minutes: Option<i64>,
    pub price: i64,
    pub price_midpoint: f64,
    pub price_per_square_meter: i64,
    pub property_type: &'a str,
}

/// Weighted composite score. `None` when the BER rating cannot be scored.
pub fn calculate_scoring(inputs: &ScoreInputs) -> Option<Scoring> {
    let factors = ScoreFactors {
        ber: ber_score(inputs.ber_rating)?,
        bedrooms: inputs.bedrooms * 25,
        bathrooms: inputs.bathrooms * 10,
        floor_area: floor_area_score(inputs.floor_area),
        distance: distance_score(inputs.distance_km),
        transport: transport_score(inputs.transport_minutes),
        store: inputs.store_minutes.map(store_score),
        price: price_score(inputs.price, inputs.price_midpoint),
        price_per_square_meter: price_per_square_meter_score(inputs.price_per_square_meter),
        property_type: property_type_score(inputs.property_type),
    };
    Some(Scoring::from(factors))
}
