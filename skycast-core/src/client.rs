//! OpenWeatherMap client: current conditions plus the 5-day / 3-hour
//! forecast, both in metric units.

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::Error;
use crate::model::{Condition, CurrentConditions, ForecastSample, LocationQuery};
use crate::view::capitalize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const MPS_TO_KPH: f64 = 3.6;

#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, API_BASE_URL.to_string())
    }

    /// Base URL override, used by tests to point at a mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    /// Fetch current conditions and the raw forecast list for a location.
    /// The two requests are issued sequentially; a non-success status on
    /// either is fatal for the whole fetch.
    pub async fn fetch(
        &self,
        query: &LocationQuery,
    ) -> Result<(CurrentConditions, Vec<ForecastSample>), Error> {
        let current = self.fetch_current(query).await?;
        let forecast = self.fetch_forecast(query).await?;
        Ok((current, forecast))
    }

    async fn fetch_current(&self, query: &LocationQuery) -> Result<CurrentConditions, Error> {
        let url = format!("{}/weather", self.base_url);
        let body = self.request(&url, query).await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        let raw_condition = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .ok_or(Error::MalformedPayload("weather"))?;

        Ok(CurrentConditions {
            city: parsed.name,
            country: parsed.sys.country,
            temperature_c: parsed.main.temp.round() as i32,
            condition: Condition::from_label(&raw_condition),
            condition_text: capitalize(&raw_condition),
            cloud_cover_pct: parsed.clouds.map(|c| c.all).unwrap_or(0),
            humidity_pct: parsed.main.humidity,
            wind_kph: (parsed.wind.speed * MPS_TO_KPH).round() as i32,
        })
    }

    async fn fetch_forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastSample>, Error> {
        let url = format!("{}/forecast", self.base_url);
        let body = self.request(&url, query).await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        // City-local time drives the per-day bucketing downstream.
        let offset = FixedOffset::east_opt(parsed.city.timezone)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));

        let mut samples = Vec::with_capacity(parsed.list.len());
        for entry in parsed.list {
            let timestamp_utc = DateTime::<Utc>::from_timestamp(entry.dt, 0)
                .ok_or(Error::MalformedPayload("dt"))?;
            let local = timestamp_utc.with_timezone(&offset);

            let condition = entry
                .weather
                .into_iter()
                .next()
                .map(|w| w.main)
                .ok_or(Error::MalformedPayload("weather"))?;

            samples.push(ForecastSample {
                timestamp_utc,
                local_date: local.date_naive(),
                local_hour: local.hour(),
                temperature_c: entry.main.temp,
                condition,
            });
        }

        Ok(samples)
    }

    async fn request(&self, url: &str, query: &LocationQuery) -> Result<String, Error> {
        let mut params: Vec<(&str, String)> = vec![
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        match query {
            LocationQuery::City(city) => params.push(("q", city.clone())),
            LocationQuery::Coords {
                latitude,
                longitude,
            } => {
                params.push(("lat", latitude.to_string()));
                params.push(("lon", longitude.to_string()));
            }
        }

        let res = self.http.get(url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::Fetch {
                status,
                body: truncate_body(&body),
            });
        }

        debug!(%url, "weather request succeeded");
        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    clouds: Option<OwClouds>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    /// Shift from UTC in seconds.
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Back off to a char boundary so multibyte bodies can't split.
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
