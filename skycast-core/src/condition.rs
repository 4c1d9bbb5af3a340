//! WMO weather code classification.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

use crate::{locale::Locale, model::ConditionCode};

/// Finer-grained variant of a [`ConditionCode`], kept for the human description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Showers,
    Snow,
    SnowShowers,
    Thunderstorm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub condition: ConditionCode,
    pub kind: ConditionKind,
}

impl Classification {
    pub fn description(&self, locale: Locale) -> &'static str {
        self.kind.description(locale)
    }
}

impl ConditionKind {
    pub fn description(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Clear => "Sunny",
                Self::PartlyCloudy => "Partly Cloudy",
                Self::Overcast => "Cloudy",
                Self::Fog => "Fog",
                Self::Drizzle => "Drizzle",
                Self::Rain => "Rain",
                Self::Showers => "Rain Showers",
                Self::Snow => "Snow",
                Self::SnowShowers => "Snow Showers",
                Self::Thunderstorm => "Storm",
            },
            Locale::Pt => match self {
                Self::Clear => "Ensolarado",
                Self::PartlyCloudy => "Parcialmente Nublado",
                Self::Overcast => "Nublado",
                Self::Fog => "Nevoeiro",
                Self::Drizzle => "Garoa",
                Self::Rain => "Chuva",
                Self::Showers => "Pancadas de Chuva",
                Self::Snow => "Neve",
                Self::SnowShowers => "Pancadas de Neve",
                Self::Thunderstorm => "Tempestade",
            },
        }
    }
}

/// Map a WMO weather code onto the closed taxonomy.
///
/// Total over `i32`: codes outside the table classify as sunny.
pub fn classify(code: i32) -> Classification {
    use ConditionCode as C;
    use ConditionKind as K;

    let (condition, kind) = match code {
        0 | 1 => (C::Sunny, K::Clear),
        2 => (C::PartlyCloudy, K::PartlyCloudy),
        3 => (C::Cloudy, K::Overcast),
        45 | 48 => (C::Cloudy, K::Fog),
        51 | 53 | 55 | 56 | 57 => (C::Rain, K::Drizzle),
        61 | 63 | 65 | 66 | 67 => (C::Rain, K::Rain),
        71 | 73 | 75 | 77 => (C::Snow, K::Snow),
        80..=82 => (C::Rain, K::Showers),
        85 | 86 => (C::Snow, K::SnowShowers),
        95 | 96 | 99 => (C::Storm, K::Thunderstorm),
        _ => (C::Sunny, K::Clear),
    };

    Classification { condition, kind }
}

pub fn is_storm_code(code: i32) -> bool {
    matches!(code, 95 | 96 | 99)
}

/// Snowfall plus freezing drizzle and freezing rain.
pub fn is_snow_or_ice_code(code: i32) -> bool {
    matches!(code, 56 | 57 | 66 | 67 | 71 | 73 | 75 | 77 | 85 | 86)
}
