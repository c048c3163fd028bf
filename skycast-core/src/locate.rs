//! Location resolution: an ordered fallback chain that always produces a
//! usable [`LocationQuery`].
//!
//! Order: persisted city → IP geolocation probe → device geolocation probe →
//! fixed default city. No step is retried; every failure falls through to the
//! next step, so `resolve` itself has no error path.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::model::LocationQuery;

/// Last-resort city when every probe fails.
pub const DEFAULT_CITY: &str = "Bishkek";

const IP_API_URL: &str = "https://ipapi.co/json/";
const PROBE_TIMEOUT_SECS: u64 = 10;

/// Probe failures. Absorbed inside the resolver; callers never see them.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location service unavailable")]
    ServiceUnavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("location probe error: {0}")]
    Probe(String),
}

/// IP-based geolocation: returns a city name for the caller's public IP.
#[async_trait]
pub trait IpProbe: Send + Sync {
    async fn lookup_city(&self) -> Result<String, LocationError>;
}

/// Device geolocation: returns a latitude/longitude pair when the platform
/// grants access to a positioning service.
#[async_trait]
pub trait DeviceProbe: Send + Sync {
    async fn position(&self) -> Result<(f64, f64), LocationError>;
}

/// [`IpProbe`] backed by the ipapi.co JSON endpoint. No API key required.
#[derive(Debug, Clone)]
pub struct IpApiProbe {
    http: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    city: Option<String>,
}

impl IpApiProbe {
    pub fn new() -> Self {
        Self::with_url(IP_API_URL.to_string())
    }

    /// Endpoint override, used by tests to point at a mock server.
    pub fn with_url(url: String) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { http, url }
    }
}

impl Default for IpApiProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IpProbe for IpApiProbe {
    async fn lookup_city(&self) -> Result<String, LocationError> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Probe(e.to_string()))?;

        if !res.status().is_success() {
            return Err(LocationError::Probe(format!(
                "ip lookup returned status {}",
                res.status()
            )));
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|e| LocationError::Probe(e.to_string()))?;

        match body.city {
            Some(city) if !city.is_empty() => Ok(city),
            _ => Err(LocationError::ServiceUnavailable),
        }
    }
}

/// Device geolocation hook. Desktop builds have no positioning service wired
/// up, so the stock probe always reports unavailable and the resolver falls
/// through to the default city.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedDevice;

#[async_trait]
impl DeviceProbe for UnsupportedDevice {
    async fn position(&self) -> Result<(f64, f64), LocationError> {
        Err(LocationError::ServiceUnavailable)
    }
}

/// Runs the fallback chain. Pure resolution: persisting the resolved city
/// happens elsewhere, only after a successful weather fetch.
pub struct LocationResolver<'a> {
    persisted_city: Option<String>,
    ip: &'a dyn IpProbe,
    device: &'a dyn DeviceProbe,
}

impl<'a> LocationResolver<'a> {
    pub fn new(
        persisted_city: Option<String>,
        ip: &'a dyn IpProbe,
        device: &'a dyn DeviceProbe,
    ) -> Self {
        Self {
            persisted_city,
            ip,
            device,
        }
    }

    /// Always resolves. A persisted city short-circuits all network probing.
    pub async fn resolve(&self) -> LocationQuery {
        if let Some(city) = &self.persisted_city {
            debug!(%city, "using persisted city");
            return LocationQuery::City(city.clone());
        }

        match self.ip.lookup_city().await {
            Ok(city) => {
                debug!(%city, "resolved via ip probe");
                return LocationQuery::City(city);
            }
            Err(err) => debug!(%err, "ip probe failed, trying device geolocation"),
        }

        match self.device.position().await {
            Ok((latitude, longitude)) => {
                debug!(latitude, longitude, "resolved via device geolocation");
                return LocationQuery::Coords {
                    latitude,
                    longitude,
                };
            }
            Err(err) => debug!(%err, "device geolocation failed, using default city"),
        }

        LocationQuery::City(DEFAULT_CITY.to_string())
    }
}
