use serde::{Deserialize, Serialize};

/// WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Where the snapshot is for. Supplied by the caller and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub display_name: String,
    pub district: Option<String>,
    pub coordinate: Coordinate,
}

impl Location {
    pub fn new(
        display_name: impl Into<String>,
        district: Option<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self { display_name: display_name.into(), district, coordinate }
    }
}

/// Closed weather taxonomy. A nominal tag; severity lives on [`Alert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionCode {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Storm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PollenLevel {
    #[default]
    Low,
    Moderate,
    High,
    VeryHigh,
}

/// Pollutant concentrations in µg/m³. Never negative, zero when unreported.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pollutants {
    pub pm2_5: f64,
    pub pm10: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity: u8,
    pub wind_speed_kmh: i32,
    pub uv_index: f64,
    pub condition: ConditionCode,
    pub description: String,
    pub aqi: u32,
    pub pollen_level: PollenLevel,
    pub pollutants: Pollutants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    /// `HH:00` in the location's local time.
    pub label: String,
    pub temperature: i32,
    pub precipitation_chance: u8,
    pub condition: ConditionCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub day_label: String,
    pub min_temp: i32,
    pub max_temp: i32,
    pub precipitation_chance: u8,
    pub condition: ConditionCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Moderate,
    Severe,
    Extreme,
}

impl Severity {
    /// Rank used to order alerts, highest first.
    pub fn weight(self) -> u8 {
        match self {
            Severity::Moderate => 1,
            Severity::Severe => 2,
            Severity::Extreme => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub issued_at: String,
}

/// Whether a snapshot came from upstream data or was synthesized after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    Live,
    Fallback,
}

/// One complete weather result for a location. Built once, replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
    pub alerts: Vec<Alert>,
    pub mode: DataMode,
}

impl WeatherSnapshot {
    pub fn is_fallback(&self) -> bool {
        self.mode == DataMode::Fallback
    }
}
