use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    aggregator::FetchSettings,
    cities::{self, City},
    locale::Locale,
};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";
pub const DEFAULT_FORECAST_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_AIR_QUALITY_TIMEOUT_SECS: u64 = 5;

/// Upstream base URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub forecast_url: String,
    pub air_quality_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            air_quality_url: DEFAULT_AIR_QUALITY_URL.to_string(),
        }
    }
}

/// Per-request time limits, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub forecast_secs: u64,
    pub air_quality_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            forecast_secs: DEFAULT_FORECAST_TIMEOUT_SECS,
            air_quality_secs: DEFAULT_AIR_QUALITY_TIMEOUT_SECS,
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// "en" or "pt". Falls back to `LANG` when unset.
    pub locale: Option<String>,

    /// Name of a city from the built-in catalog, e.g. "Lisbon".
    pub default_city: Option<String>,

    /// Example TOML:
    /// [endpoints]
    /// forecast_url = "http://localhost:8080/v1/forecast"
    pub endpoints: Endpoints,

    pub timeouts: Timeouts,
}

impl Config {
    /// Configured locale, or the process locale when none is set.
    pub fn locale(&self) -> Result<Locale> {
        match self.locale.as_deref() {
            Some(s) => Locale::try_from(s),
            None => Ok(Locale::from_env()),
        }
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = Some(locale.as_str().to_string());
    }

    /// Configured default city, or London.
    pub fn default_city(&self) -> Result<&'static City> {
        let name = self.default_city.as_deref().unwrap_or(cities::DEFAULT_CITY);
        cities::find(name).ok_or_else(|| {
            anyhow!(
                "Unknown default city '{name}'.\n\
                 Hint: run `skycast cities` to list the built-in cities."
            )
        })
    }

    /// Store the catalog's spelling of `name` as the default city.
    pub fn set_default_city(&mut self, name: &str) -> Result<()> {
        let city = cities::find(name).ok_or_else(|| anyhow!("Unknown city '{name}'."))?;
        self.default_city = Some(city.name.to_string());
        Ok(())
    }

    /// Validated settings for [`crate::WeatherAggregator`].
    ///
    /// The air-quality limit is capped at the forecast limit.
    pub fn fetch_settings(&self) -> Result<FetchSettings> {
        let Timeouts { forecast_secs, air_quality_secs } = self.timeouts;
        if forecast_secs == 0 || air_quality_secs == 0 {
            return Err(anyhow!("Timeouts must be at least one second."));
        }

        Ok(FetchSettings {
            forecast_timeout: Duration::from_secs(forecast_secs),
            air_quality_timeout: Duration::from_secs(air_quality_secs.min(forecast_secs)),
            locale: self.locale()?,
        })
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
