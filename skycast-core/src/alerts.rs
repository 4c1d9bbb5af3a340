//! Rule-based alert derivation from raw current-conditions scalars.

use crate::{
    condition::{is_snow_or_ice_code, is_storm_code},
    locale::Locale,
    model::{Alert, PollenLevel, Severity},
};

/// Raw, unrounded readings the rules are evaluated against.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertInputs {
    pub weather_code: i32,
    pub wind_speed_kmh: f64,
    pub precipitation_mm: f64,
    pub temperature_c: f64,
    pub aqi: u32,
    pub pollen_level: PollenLevel,
    /// Observation time label copied onto every alert.
    pub issued_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Thunderstorm,
    SnowIce,
    HighWind,
    HeavyRain,
    Heat,
    Freeze,
    Pollen,
    AirQuality,
}

impl AlertKind {
    /// Stable key, identical for identical inputs.
    pub fn id(self) -> &'static str {
        match self {
            AlertKind::Thunderstorm => "storm",
            AlertKind::SnowIce => "snow-ice",
            AlertKind::HighWind => "wind",
            AlertKind::HeavyRain => "heavy-rain",
            AlertKind::Heat => "heat",
            AlertKind::Freeze => "freeze",
            AlertKind::Pollen => "pollen",
            AlertKind::AirQuality => "air-quality",
        }
    }

    pub fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (AlertKind::Thunderstorm, Locale::En) => "Thunderstorm",
            (AlertKind::Thunderstorm, Locale::Pt) => "Tempestade",
            (AlertKind::SnowIce, Locale::En) => "Snow/Ice",
            (AlertKind::SnowIce, Locale::Pt) => "Neve/Gelo",
            (AlertKind::HighWind, Locale::En) => "High Winds",
            (AlertKind::HighWind, Locale::Pt) => "Ventos Fortes",
            (AlertKind::HeavyRain, Locale::En) => "Heavy Rain",
            (AlertKind::HeavyRain, Locale::Pt) => "Chuva Forte",
            (AlertKind::Heat, Locale::En) => "Heat",
            (AlertKind::Heat, Locale::Pt) => "Calor Extremo",
            (AlertKind::Freeze, Locale::En) => "Freeze",
            (AlertKind::Freeze, Locale::Pt) => "Congelamento",
            (AlertKind::Pollen, Locale::En) => "Pollen",
            (AlertKind::Pollen, Locale::Pt) => "Pólen",
            (AlertKind::AirQuality, Locale::En) => "Poor Air Quality",
            (AlertKind::AirQuality, Locale::Pt) => "Qualidade do Ar Ruim",
        }
    }

    fn description(self, inputs: &AlertInputs, locale: Locale) -> String {
        match (self, locale) {
            (AlertKind::Thunderstorm, Locale::En) => {
                "Thunderstorm activity in the area. Avoid open spaces.".to_string()
            }
            (AlertKind::Thunderstorm, Locale::Pt) => {
                "Atividade de tempestade na região. Evite áreas abertas.".to_string()
            }
            (AlertKind::SnowIce, Locale::En) => {
                "Snow or ice expected. Roads and sidewalks may be slippery.".to_string()
            }
            (AlertKind::SnowIce, Locale::Pt) => {
                "Neve ou gelo previstos. Vias e calçadas podem ficar escorregadias.".to_string()
            }
            (AlertKind::HighWind, Locale::En) => {
                format!("Winds of {:.0} km/h detected.", inputs.wind_speed_kmh)
            }
            (AlertKind::HighWind, Locale::Pt) => {
                format!("Ventos de {:.0} km/h detectados.", inputs.wind_speed_kmh)
            }
            (AlertKind::HeavyRain, Locale::En) => {
                format!("{:.1} mm of precipitation in the last hour.", inputs.precipitation_mm)
            }
            (AlertKind::HeavyRain, Locale::Pt) => {
                format!("{:.1} mm de precipitação na última hora.", inputs.precipitation_mm)
            }
            (AlertKind::Heat, Locale::En) => {
                format!(
                    "Temperature of {:.0}°C. Stay hydrated and avoid the sun.",
                    inputs.temperature_c
                )
            }
            (AlertKind::Heat, Locale::Pt) => {
                format!("Temperatura de {:.0}°C. Hidrate-se e evite o sol.", inputs.temperature_c)
            }
            (AlertKind::Freeze, Locale::En) => {
                format!("Temperature of {:.0}°C. Risk of frost and ice.", inputs.temperature_c)
            }
            (AlertKind::Freeze, Locale::Pt) => {
                format!("Temperatura de {:.0}°C. Risco de geada.", inputs.temperature_c)
            }
            (AlertKind::Pollen, Locale::En) => {
                "Very high pollen levels. Allergy sufferers should limit time outdoors.".to_string()
            }
            (AlertKind::Pollen, Locale::Pt) => {
                "Níveis de pólen críticos. Alérgicos devem evitar áreas externas.".to_string()
            }
            (AlertKind::AirQuality, Locale::En) => {
                format!("European AQI at {}. Reduce outdoor exertion.", inputs.aqi)
            }
            (AlertKind::AirQuality, Locale::Pt) => {
                format!("IQA europeu em {}. Reduza esforços ao ar livre.", inputs.aqi)
            }
        }
    }
}

type Predicate = fn(&AlertInputs) -> Option<Severity>;

/// Evaluation order. Every rule runs; each yields at most one alert.
const RULES: &[(AlertKind, Predicate)] = &[
    (AlertKind::Thunderstorm, |i: &AlertInputs| {
        is_storm_code(i.weather_code).then_some(Severity::Severe)
    }),
    (AlertKind::SnowIce, |i: &AlertInputs| {
        is_snow_or_ice_code(i.weather_code).then_some(Severity::Moderate)
    }),
    (AlertKind::HighWind, |i: &AlertInputs| escalating(i.wind_speed_kmh, 40.0, 60.0)),
    (AlertKind::HeavyRain, |i: &AlertInputs| {
        (i.precipitation_mm > 5.0).then_some(Severity::Moderate)
    }),
    (AlertKind::Heat, |i: &AlertInputs| (i.temperature_c > 35.0).then_some(Severity::Extreme)),
    (AlertKind::Freeze, |i: &AlertInputs| (i.temperature_c < 0.0).then_some(Severity::Moderate)),
    (AlertKind::Pollen, |i: &AlertInputs| {
        (i.pollen_level == PollenLevel::VeryHigh).then_some(Severity::Moderate)
    }),
    (AlertKind::AirQuality, |i: &AlertInputs| escalating(f64::from(i.aqi), 60.0, 80.0)),
];

fn escalating(value: f64, moderate_above: f64, severe_above: f64) -> Option<Severity> {
    if value > severe_above {
        Some(Severity::Severe)
    } else if value > moderate_above {
        Some(Severity::Moderate)
    } else {
        None
    }
}

/// Evaluate every rule and return the fired alerts, most severe first.
///
/// Alerts of equal severity keep rule order.
pub fn derive(inputs: &AlertInputs, locale: Locale) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = RULES
        .iter()
        .filter_map(|(kind, predicate)| {
            predicate(inputs).map(|severity| Alert {
                id: kind.id().to_string(),
                severity,
                title: kind.title(locale).to_string(),
                description: kind.description(inputs, locale),
                issued_at: inputs.issued_at.clone(),
            })
        })
        .collect();

    // sort_by_key is stable
    alerts.sort_by_key(|a| std::cmp::Reverse(a.severity.weight()));
    alerts
}
