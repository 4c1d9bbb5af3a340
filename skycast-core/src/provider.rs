use async_trait::async_trait;
use serde_json::Value;
use std::fmt::{self, Debug};

use crate::{error::UpstreamError, model::Coordinate};

pub mod openmeteo;

pub use openmeteo::{ForecastPayload, OpenMeteoClient};

/// The two upstream data feeds a snapshot is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    /// Current conditions plus hourly and daily forecast. Required.
    Forecast,
    /// Pollutants, AQI and pollen. Optional.
    AirQuality,
}

impl Feed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::Forecast => "forecast",
            Feed::AirQuality => "air-quality",
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only access to the forecast and air-quality providers.
///
/// The forecast payload is validated strictly; the air-quality body is handed
/// back as loose JSON and normalized field by field.
#[async_trait]
pub trait WeatherUpstream: Send + Sync + Debug {
    async fn forecast(&self, coordinate: Coordinate) -> Result<ForecastPayload, UpstreamError>;

    async fn air_quality(&self, coordinate: Coordinate) -> Result<Value, UpstreamError>;
}
