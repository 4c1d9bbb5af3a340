use std::fmt::Write;

use skycast_core::{Alert, ConditionCode, Locale, PollenLevel, Severity, WeatherSnapshot};

/// Plain-text rendering of a snapshot.
pub fn snapshot(snap: &WeatherSnapshot, locale: Locale) -> String {
    let mut out = String::new();
    let cur = &snap.current;

    let _ = write!(out, "{}", snap.location.display_name);
    if let Some(district) = snap.location.district.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(out, " ({district})");
    }
    if snap.is_fallback() {
        out.push_str(match locale {
            Locale::En => "  [offline data]",
            Locale::Pt => "  [dados offline]",
        });
    }
    out.push('\n');

    let _ = writeln!(out, "{} {}°C  {}", symbol(cur.condition), cur.temperature, cur.description);
    let _ = writeln!(
        out,
        "feels {}°C  humidity {}%  wind {} km/h  UV {:.0}",
        cur.feels_like, cur.humidity, cur.wind_speed_kmh, cur.uv_index
    );
    let _ = writeln!(
        out,
        "AQI {}  pollen {}  PM2.5 {:.1}  PM10 {:.1}  NO2 {:.1}  O3 {:.1}  SO2 {:.1}",
        cur.aqi,
        pollen(cur.pollen_level),
        cur.pollutants.pm2_5,
        cur.pollutants.pm10,
        cur.pollutants.no2,
        cur.pollutants.o3,
        cur.pollutants.so2
    );

    for a in &snap.alerts {
        out.push_str(&alert(a));
    }

    out.push('\n');
    for h in snap.hourly.iter().step_by(3) {
        let _ = writeln!(
            out,
            "{}  {} {:>3}°  {:>3}%",
            h.label,
            symbol(h.condition),
            h.temperature,
            h.precipitation_chance
        );
    }

    out.push('\n');
    for d in &snap.daily {
        let _ = writeln!(
            out,
            "{:<4} {} {:>3}° / {:>3}°  {:>3}%",
            d.day_label,
            symbol(d.condition),
            d.min_temp,
            d.max_temp,
            d.precipitation_chance
        );
    }

    out
}

fn alert(a: &Alert) -> String {
    let tag = match a.severity {
        Severity::Extreme => "EXTREME",
        Severity::Severe => "SEVERE",
        Severity::Moderate => "moderate",
    };
    format!("! [{tag}] {}: {}\n", a.title, a.description)
}

fn pollen(level: PollenLevel) -> &'static str {
    match level {
        PollenLevel::Low => "low",
        PollenLevel::Moderate => "moderate",
        PollenLevel::High => "high",
        PollenLevel::VeryHigh => "very high",
    }
}

fn symbol(condition: ConditionCode) -> &'static str {
    match condition {
        ConditionCode::Sunny => "\u{2600}",
        ConditionCode::PartlyCloudy => "\u{26C5}",
        ConditionCode::Cloudy => "\u{2601}",
        ConditionCode::Rain => "\u{1F327}",
        ConditionCode::Snow => "\u{2744}",
        ConditionCode::Storm => "\u{26C8}",
    }
}
