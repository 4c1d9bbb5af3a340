//! Orchestration of the forecast and air-quality feeds into one snapshot.

use chrono::Local;
use serde_json::Value;
use std::{future::Future, sync::Arc, time::Duration};
use tracing::{debug, warn};

use crate::{
    air_quality::{self, AirQuality},
    alerts::{self, AlertInputs},
    condition::classify,
    config::{Config, DEFAULT_AIR_QUALITY_TIMEOUT_SECS, DEFAULT_FORECAST_TIMEOUT_SECS},
    error::UpstreamError,
    fallback,
    forecast::{self, round_temp},
    locale::Locale,
    model::{Coordinate, CurrentConditions, DataMode, Location, WeatherSnapshot},
    provider::{Feed, ForecastPayload, OpenMeteoClient, WeatherUpstream},
};

/// Issue time used for alerts when the forecast carries no observation time.
const ISSUED_NOW: &str = "now";

#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// Hard limit for the forecast request; past it the fallback is served.
    pub forecast_timeout: Duration,
    /// How long air quality may take before it is treated as absent.
    pub air_quality_timeout: Duration,
    pub locale: Locale,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            forecast_timeout: Duration::from_secs(DEFAULT_FORECAST_TIMEOUT_SECS),
            air_quality_timeout: Duration::from_secs(DEFAULT_AIR_QUALITY_TIMEOUT_SECS),
            locale: Locale::default(),
        }
    }
}

/// Builds [`WeatherSnapshot`]s. Holds no mutable state, so concurrent fetches
/// for different locations do not interact.
#[derive(Debug, Clone)]
pub struct WeatherAggregator {
    upstream: Arc<dyn WeatherUpstream>,
    settings: FetchSettings,
}

impl WeatherAggregator {
    pub fn new(upstream: Arc<dyn WeatherUpstream>, settings: FetchSettings) -> Self {
        Self { upstream, settings }
    }

    /// Aggregator over the Open-Meteo endpoints and limits from `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let settings = config.fetch_settings()?;
        let client = OpenMeteoClient::new(config.endpoints.clone());
        Ok(Self::new(Arc::new(client), settings))
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Fetch and assemble a snapshot for `location`.
    ///
    /// Never fails: a forecast failure yields the synthetic fallback snapshot,
    /// an air-quality failure yields default air quality.
    #[tracing::instrument(skip_all, fields(location = %location.display_name))]
    pub async fn fetch(&self, location: Location) -> WeatherSnapshot {
        let coordinate = location.coordinate;
        let air_limit = self.settings.air_quality_timeout.min(self.settings.forecast_timeout);

        let forecast = bounded(
            Feed::Forecast,
            self.settings.forecast_timeout,
            self.upstream.forecast(coordinate),
        );
        let air = bounded(Feed::AirQuality, air_limit, self.upstream.air_quality(coordinate));
        tokio::pin!(forecast, air);

        // Poll air quality only while the forecast is still pending.
        let mut early_air = None;
        let forecast = loop {
            tokio::select! {
                res = &mut forecast => break res,
                res = &mut air, if early_air.is_none() => early_air = Some(res),
            }
        };

        let payload = match forecast {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, feed = %err.feed(), "serving fallback snapshot");
                return fallback::synthesize(
                    location,
                    self.settings.locale,
                    Local::now().date_naive(),
                );
            }
        };
        debug!("forecast received");

        let air = match early_air {
            Some(res) => res,
            None => air.await,
        };
        let air = match air {
            Ok(body) => Some(body),
            Err(err) => {
                warn!(error = %err, feed = %err.feed(), "using default air quality");
                None
            }
        };

        assemble(location, &payload, air.as_ref(), self.settings.locale)
    }

    pub async fn fetch_coordinate(
        &self,
        coordinate: Coordinate,
        display_name: &str,
        district: Option<&str>,
    ) -> WeatherSnapshot {
        let location = Location::new(display_name, district.map(str::to_owned), coordinate);
        self.fetch(location).await
    }
}

async fn bounded<T>(
    feed: Feed,
    limit: Duration,
    request: impl Future<Output = Result<T, UpstreamError>>,
) -> Result<T, UpstreamError> {
    tokio::time::timeout(limit, request)
        .await
        .map_err(|_| UpstreamError::Timeout { feed, after: limit })?
}

/// Pure transformation of validated upstream payloads into a live snapshot.
pub fn assemble(
    location: Location,
    payload: &ForecastPayload,
    air_quality: Option<&Value>,
    locale: Locale,
) -> WeatherSnapshot {
    let AirQuality { aqi, pollen_level, pollutants } = air_quality::normalize(air_quality);
    let now = &payload.current;
    let sky = classify(now.weather_code);

    let current = CurrentConditions {
        temperature: round_temp(now.temperature_2m),
        feels_like: round_temp(now.apparent_temperature),
        humidity: now.relative_humidity_2m.clamp(0.0, 100.0).round() as u8,
        wind_speed_kmh: round_temp(now.wind_speed_10m),
        uv_index: now.uv_index.filter(|uv| *uv >= 0.0).unwrap_or(0.0),
        condition: sky.condition,
        description: sky.description(locale).to_string(),
        aqi,
        pollen_level,
        pollutants,
    };

    let hourly = forecast::project_hourly(
        &payload.hourly.time,
        &payload.hourly.temperature_2m,
        &payload.hourly.precipitation_probability,
        &payload.hourly.weather_code,
    );

    let daily = forecast::project_daily(
        &payload.daily.time,
        &payload.daily.temperature_2m_min,
        &payload.daily.temperature_2m_max,
        &payload.daily.precipitation_probability_max,
        &payload.daily.weather_code,
        locale,
    );

    let inputs = AlertInputs {
        weather_code: now.weather_code,
        wind_speed_kmh: now.wind_speed_10m,
        precipitation_mm: now.precipitation.unwrap_or(0.0),
        temperature_c: now.temperature_2m,
        aqi,
        pollen_level,
        issued_at: now.time.clone().unwrap_or_else(|| ISSUED_NOW.to_string()),
    };

    WeatherSnapshot {
        location,
        current,
        hourly,
        daily,
        alerts: alerts::derive(&inputs, locale),
        mode: DataMode::Live,
    }
}
