//! Core library for the `skycast` weather widget.
//!
//! This crate defines:
//! - Location resolution with an ordered fallback chain
//! - An OpenWeatherMap client (current conditions + 3-hourly forecast)
//! - Forecast reduction to one representative entry per upcoming day
//! - View-model assembly for the render surface
//! - Configuration & last-city persistence
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod locate;
pub mod model;
pub mod reduce;
pub mod view;

pub use client::WeatherClient;
pub use config::Config;
pub use error::{Error, validate_city_input};
pub use locate::{DEFAULT_CITY, IpApiProbe, LocationResolver, UnsupportedDevice};
pub use model::{Condition, CurrentConditions, DailyForecast, ForecastSample, LocationQuery};
pub use reduce::reduce;
pub use view::{DisplayModel, ForecastCard, build};
