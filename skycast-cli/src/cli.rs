use anyhow::{Context, anyhow, ensure};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Select};
use skycast_core::{
    Config, Coordinate, Locale, Location, WeatherAggregator, WeatherSnapshot,
    cities::{self, CITIES},
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "SkyCast weather dashboard in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a built-in city (the configured default if omitted).
    Show {
        /// City name, e.g. "Lisbon" or "New York".
        city: Option<String>,

        #[command(flatten)]
        output: Output,
    },

    /// Show weather for explicit coordinates.
    At {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Display name; defaults to "My Location".
        #[arg(long)]
        name: Option<String>,

        /// Optional sub-district shown under the name.
        #[arg(long)]
        district: Option<String>,

        #[command(flatten)]
        output: Output,
    },

    /// List the built-in cities.
    Cities,

    /// Interactively set locale, default city and timeouts.
    Configure,
}

#[derive(Debug, Args)]
pub struct Output {
    /// Print the snapshot as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Show { city, output } => {
                let location = match city {
                    Some(name) => cities::find(&name)
                        .ok_or_else(|| {
                            anyhow!(
                                "Unknown city '{name}'.\n\
                                 Hint: run `skycast cities`, \
                                 or use `skycast at --lat <LAT> --lon <LON>`."
                            )
                        })?
                        .location(),
                    None => config.default_city()?.location(),
                };
                show(&config, location, &output).await
            }
            Command::At { lat, lon, name, district, output } => {
                ensure!((-90.0..=90.0).contains(&lat), "Latitude must be between -90 and 90.");
                ensure!((-180.0..=180.0).contains(&lon), "Longitude must be between -180 and 180.");

                let name = name.unwrap_or_else(|| {
                    config.locale().unwrap_or_default().my_location().to_string()
                });
                let location = Location::new(name, district, Coordinate::new(lat, lon));
                show(&config, location, &output).await
            }
            Command::Cities => {
                for city in CITIES {
                    println!(
                        "{:<16} {:>9.4} {:>10.4}",
                        city.name, city.coordinate.latitude, city.coordinate.longitude
                    );
                }
                Ok(())
            }
            Command::Configure => configure(config),
        }
    }
}

async fn show(config: &Config, location: Location, output: &Output) -> anyhow::Result<()> {
    let aggregator = WeatherAggregator::from_config(config)?;
    let snapshot: WeatherSnapshot = aggregator.fetch(location).await;

    if output.json {
        let text = serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
        println!("{text}");
    } else {
        print!("{}", render::snapshot(&snapshot, aggregator.settings().locale));
    }

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current_locale = Locale::all()
        .iter()
        .position(|l| Some(l.as_str()) == config.locale.as_deref())
        .unwrap_or(0);
    let locale = Select::new("Language:", Locale::all().to_vec())
        .with_starting_cursor(current_locale)
        .prompt()?;
    config.set_locale(locale);

    let names: Vec<&str> = CITIES.iter().map(|c| c.name).collect();
    let current_city = config.default_city()?.name;
    let city = Select::new("Default city:", names.clone())
        .with_starting_cursor(names.iter().position(|n| *n == current_city).unwrap_or(0))
        .prompt()?;
    config.set_default_city(city)?;

    config.timeouts.forecast_secs = CustomType::<u64>::new("Forecast timeout (seconds):")
        .with_default(config.timeouts.forecast_secs)
        .with_validator(|v: &u64| {
            Ok(if *v == 0 {
                inquire::validator::Validation::Invalid("Must be at least 1 second".into())
            } else {
                inquire::validator::Validation::Valid
            })
        })
        .prompt()?;

    config.timeouts.air_quality_secs = CustomType::<u64>::new("Air quality timeout (seconds):")
        .with_default(config.timeouts.air_quality_secs.min(config.timeouts.forecast_secs))
        .with_help_message("Air quality slower than this is shown as unavailable")
        .prompt()?;

    // validate before writing
    config.fetch_settings()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
