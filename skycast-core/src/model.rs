use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

/// Where to fetch weather for: a city name, or a coordinate pair from
/// device geolocation.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coords { latitude: f64, longitude: f64 },
}

/// Condition buckets recognized by the icon table. Anything the upstream
/// sends outside this set lands in `Other`; the raw label text is kept
/// separately for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Other,
}

impl Condition {
    /// Map the upstream primary condition label ("Clear", "Rain", ...) to a
    /// bucket. Matching is exact: OpenWeather sends these capitalized.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Rain" => Condition::Rain,
            "Drizzle" => Condition::Drizzle,
            "Thunderstorm" => Condition::Thunderstorm,
            "Snow" => Condition::Snow,
            "Mist" => Condition::Mist,
            _ => Condition::Other,
        }
    }

    /// Fixed icon table. `Other` shares the Clouds glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            Condition::Clear => "\u{2600}\u{fe0f}",
            Condition::Clouds | Condition::Other => "\u{2601}\u{fe0f}",
            Condition::Rain => "\u{1f327}\u{fe0f}",
            Condition::Drizzle => "\u{1f326}\u{fe0f}",
            Condition::Thunderstorm => "\u{26c8}\u{fe0f}",
            Condition::Snow => "\u{2744}\u{fe0f}",
            Condition::Mist => "\u{1f32b}\u{fe0f}",
        }
    }
}

/// Current weather at the resolved location, already normalized for display:
/// integer degrees, wind converted to km/h, cloud cover defaulted to 0 when
/// the upstream omits it.
#[derive(Debug, Clone)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub temperature_c: i32,
    pub condition: Condition,
    /// Verbatim upstream label, capitalized. Independent of the icon bucket.
    pub condition_text: String,
    pub cloud_cover_pct: u8,
    pub humidity_pct: u8,
    pub wind_kph: i32,
}

/// One raw 3-hour forecast slot. Local date and hour are computed from the
/// forecast payload's city timezone offset.
#[derive(Debug, Clone)]
pub struct ForecastSample {
    pub timestamp_utc: DateTime<Utc>,
    pub local_date: NaiveDate,
    pub local_hour: u32,
    pub temperature_c: f64,
    pub condition: String,
}

/// One reduced forecast entry. Keyed by absolute date; the weekday label is
/// derived, so two calendar days sharing a weekday never merge.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub condition: Condition,
}

impl DailyForecast {
    pub fn day_name(&self) -> Weekday {
        self.date.weekday()
    }
}
