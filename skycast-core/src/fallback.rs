//! Synthetic snapshot served when the forecast feed is unavailable.

use chrono::NaiveDate;

use crate::{
    air_quality::AirQuality,
    condition::classify,
    forecast::{DAILY_POINTS, HOURLY_POINTS, day_label, round_temp},
    locale::Locale,
    model::{CurrentConditions, DailyPoint, DataMode, HourlyPoint, Location, WeatherSnapshot},
};

const PARTLY_CLOUDY: i32 = 2;
const CLEAR: i32 = 0;

/// Build a plausible static snapshot for `location`, with daily labels starting at `today`.
///
/// Air quality is left at its "unknown" defaults and the alert list is empty.
pub fn synthesize(location: Location, locale: Locale, today: NaiveDate) -> WeatherSnapshot {
    let current_sky = classify(PARTLY_CLOUDY);
    let air = AirQuality::default();

    let current = CurrentConditions {
        temperature: 18,
        feels_like: 17,
        humidity: 65,
        wind_speed_kmh: 12,
        uv_index: 3.0,
        condition: current_sky.condition,
        description: current_sky.description(locale).to_string(),
        aqi: air.aqi,
        pollen_level: air.pollen_level,
        pollutants: air.pollutants,
    };

    let hourly = (0..HOURLY_POINTS)
        .map(|i| HourlyPoint {
            label: format!("{i:02}:00"),
            temperature: round_temp(15.0 + (i as f64 / 4.0).sin() * 5.0),
            precipitation_chance: 10,
            condition: current_sky.condition,
        })
        .collect();

    let daily = today
        .iter_days()
        .take(DAILY_POINTS)
        .map(|date| DailyPoint {
            day_label: day_label(Some(date), locale),
            min_temp: 12,
            max_temp: 22,
            precipitation_chance: 5,
            condition: classify(CLEAR).condition,
        })
        .collect();

    WeatherSnapshot {
        location,
        current,
        hourly,
        daily,
        alerts: Vec::new(),
        mode: DataMode::Fallback,
    }
}
