//! Normalization of the air-quality payload.
//!
//! The payload is read field by field from a loose JSON value so that one bad
//! or missing field never discards the others.

use serde_json::Value;

use crate::model::{PollenLevel, Pollutants};

/// AQI reported when no air-quality data is available.
///
/// Indistinguishable from a real reading of 30 for consumers.
pub const NEUTRAL_AQI: u32 = 30;

/// Pollen species requested from the air-quality endpoint, in grains/m³.
pub const POLLEN_SPECIES: [&str; 6] = [
    "alder_pollen",
    "birch_pollen",
    "grass_pollen",
    "mugwort_pollen",
    "olive_pollen",
    "ragweed_pollen",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirQuality {
    pub aqi: u32,
    pub pollen_level: PollenLevel,
    pub pollutants: Pollutants,
}

impl Default for AirQuality {
    fn default() -> Self {
        Self { aqi: NEUTRAL_AQI, pollen_level: PollenLevel::Low, pollutants: Pollutants::default() }
    }
}

/// Normalize a raw air-quality response body.
///
/// `None`, or a body without an object under `current`, yields the defaults.
pub fn normalize(raw: Option<&Value>) -> AirQuality {
    let Some(current) = raw.and_then(|v| v.get("current")).filter(|c| c.is_object()) else {
        return AirQuality::default();
    };

    let aqi = non_negative(current, "european_aqi")
        .map(|v| v.round() as u32)
        .unwrap_or(NEUTRAL_AQI);

    let field = |key: &str| non_negative(current, key).unwrap_or(0.0);
    let pollutants = Pollutants {
        pm2_5: field("pm2_5"),
        pm10: field("pm10"),
        no2: field("nitrogen_dioxide"),
        o3: field("ozone"),
        so2: field("sulphur_dioxide"),
    };

    let worst = POLLEN_SPECIES
        .iter()
        .filter_map(|species| non_negative(current, species))
        .fold(0.0_f64, f64::max);

    AirQuality { aqi, pollen_level: pollen_level(worst), pollutants }
}

/// Bucket a pollen concentration (grains/m³).
pub fn pollen_level(grains: f64) -> PollenLevel {
    if grains >= 200.0 {
        PollenLevel::VeryHigh
    } else if grains >= 50.0 {
        PollenLevel::High
    } else if grains >= 10.0 {
        PollenLevel::Moderate
    } else {
        PollenLevel::Low
    }
}

fn non_negative(obj: &Value, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64).filter(|v| v.is_finite() && *v >= 0.0)
}
