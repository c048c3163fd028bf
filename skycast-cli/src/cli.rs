use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use skycast_core::{
    Config, IpApiProbe, LocationQuery, LocationResolver, UnsupportedDevice, WeatherClient,
    validate_city_input,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Resolve the current location and show its weather.
    Show,

    /// Show weather for a city and remember it for next time.
    Search {
        /// City name; prompts interactively when omitted.
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show => show().await,
            Command::Search { city } => search(city).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;
    config.api_key = Some(api_key);
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show() -> Result<()> {
    let config = Config::load()?;

    let ip = IpApiProbe::new();
    let device = UnsupportedDevice;
    let resolver = LocationResolver::new(config.last_city.clone(), &ip, &device);
    let query = resolver.resolve().await;

    fetch_and_render(config, &query).await
}

async fn search(city: Option<String>) -> Result<()> {
    let raw = match city {
        Some(city) => city,
        None => inquire::Text::new("City:").prompt()?,
    };
    // Blank input stops here; no fetch is made.
    let city = validate_city_input(&raw)?.to_string();

    let config = Config::load()?;
    fetch_and_render(config, &LocationQuery::City(city)).await
}

async fn fetch_and_render(mut config: Config, query: &LocationQuery) -> Result<()> {
    let client = WeatherClient::new(config.api_key()?.to_string());

    let (current, samples) = client
        .fetch(query)
        .await
        .map_err(|err| anyhow::anyhow!("Error fetching weather: {err}"))?;

    let today = Local::now().date_naive();
    let days = skycast_core::reduce(&samples, today);
    let model = skycast_core::build(&current, &days, today);
    print!("{}", render::render(&model));

    // The upstream echoes a canonical city name; remember that one.
    config.remember_city(&current.city);
    config.save()?;

    Ok(())
}
