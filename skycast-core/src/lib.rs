//! Core library for SkyCast.
//!
//! This crate defines:
//! - The snapshot model handed to presentation layers
//! - Weather code classification, air-quality normalization and alert rules
//! - Projection of upstream series into fixed-length forecasts
//! - The aggregator that fetches both Open-Meteo feeds and never fails
//! - Configuration, locales and the built-in city catalog
//!
//! It is used by `skycast-cli`, but any front end can consume [`WeatherSnapshot`].

pub mod aggregator;
pub mod air_quality;
pub mod alerts;
pub mod cities;
pub mod condition;
pub mod config;
pub mod error;
pub mod fallback;
pub mod forecast;
pub mod locale;
pub mod model;
pub mod provider;

pub use aggregator::{FetchSettings, WeatherAggregator};
pub use config::{Config, Endpoints, Timeouts};
pub use error::UpstreamError;
pub use locale::Locale;
pub use model::{
    Alert, ConditionCode, Coordinate, CurrentConditions, DailyPoint, DataMode, HourlyPoint,
    Location, PollenLevel, Pollutants, Severity, WeatherSnapshot,
};
pub use provider::{Feed, OpenMeteoClient, WeatherUpstream};
