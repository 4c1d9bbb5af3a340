use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{config::Endpoints, error::UpstreamError, model::Coordinate};

use super::{Feed, WeatherUpstream};

const FORECAST_CURRENT: &str = concat!(
    "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,",
    "weather_code,wind_speed_10m,uv_index"
);
const FORECAST_HOURLY: &str = "temperature_2m,precipitation_probability,weather_code";
const FORECAST_DAILY: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max";
const AIR_QUALITY_CURRENT: &str = concat!(
    "european_aqi,pm10,pm2_5,nitrogen_dioxide,ozone,sulphur_dioxide,",
    "alder_pollen,birch_pollen,grass_pollen,mugwort_pollen,olive_pollen,ragweed_pollen"
);

/// HTTP client for the Open-Meteo forecast and air-quality APIs.
///
/// Construct once at startup and share; it holds a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    endpoints: Endpoints,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self::with_client(Client::new(), endpoints)
    }

    pub fn with_client(http: Client, endpoints: Endpoints) -> Self {
        Self { endpoints, http }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        feed: Feed,
        url: &str,
        coordinate: Coordinate,
        current: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let latitude = coordinate.latitude.to_string();
        let longitude = coordinate.longitude.to_string();

        let res = self
            .http
            .get(url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", current),
                ("timezone", "auto"),
            ])
            .query(extra)
            .send()
            .await
            .map_err(|error| UpstreamError::Transport { feed, error })?;

        let status = res.status();
        let body = res.text().await.map_err(|error| UpstreamError::Transport { feed, error })?;

        if !status.is_success() {
            return Err(UpstreamError::Status { feed, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|error| UpstreamError::Malformed { feed, error })
    }
}

/// Forecast response. Every section is required; a missing one rejects the payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastPayload {
    pub current: CurrentPayload,
    pub hourly: HourlyPayload,
    pub daily: DailyPayload,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentPayload {
    /// Local observation time, `YYYY-MM-DDTHH:MM`.
    #[serde(default)]
    pub time: Option<String>,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    #[serde(default)]
    pub precipitation: Option<f64>,
    pub weather_code: i32,
    pub wind_speed_10m: f64,
    #[serde(default)]
    pub uv_index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyPayload {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyPayload {
    pub time: Vec<String>,
    pub weather_code: Vec<Option<i32>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,
}

#[async_trait]
impl WeatherUpstream for OpenMeteoClient {
    async fn forecast(&self, coordinate: Coordinate) -> Result<ForecastPayload, UpstreamError> {
        self.get_json(
            Feed::Forecast,
            &self.endpoints.forecast_url,
            coordinate,
            FORECAST_CURRENT,
            &[("hourly", FORECAST_HOURLY), ("daily", FORECAST_DAILY)],
        )
        .await
    }

    async fn air_quality(&self, coordinate: Coordinate) -> Result<Value, UpstreamError> {
        self.get_json(
            Feed::AirQuality,
            &self.endpoints.air_quality_url,
            coordinate,
            AIR_QUALITY_CURRENT,
            &[],
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
