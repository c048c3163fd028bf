//! View-model assembly: normalize fetched weather into the display-ready
//! shape the render surface consumes.

use chrono::NaiveDate;

use crate::model::{CurrentConditions, DailyForecast};

/// Everything the widget layout paints, fully resolved: labels, integer
/// readings, and icon glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub day_label: String,
    pub date_label: String,
    pub location: String,
    pub temperature_c: i32,
    pub condition_text: String,
    pub icon: &'static str,
    pub cloud_cover_pct: u8,
    pub humidity_pct: u8,
    pub wind_kph: i32,
    pub forecast: Vec<ForecastCard>,
}

/// One forecast-day card: abbreviated weekday, temperature, icon.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub day_label: String,
    pub temperature_c: i32,
    pub icon: &'static str,
}

/// Pure assembly; `today` supplies the header's day and date labels.
pub fn build(
    current: &CurrentConditions,
    forecast: &[DailyForecast],
    today: NaiveDate,
) -> DisplayModel {
    DisplayModel {
        day_label: today.format("%A").to_string(),
        date_label: today.format("%-d %b %Y").to_string(),
        location: format!("{}, {}", current.city, current.country),
        temperature_c: current.temperature_c,
        condition_text: current.condition_text.clone(),
        icon: current.condition.glyph(),
        cloud_cover_pct: current.cloud_cover_pct,
        humidity_pct: current.humidity_pct,
        wind_kph: current.wind_kph,
        forecast: forecast
            .iter()
            .map(|day| ForecastCard {
                day_label: day.date.format("%a").to_string(),
                temperature_c: day.temperature_c,
                icon: day.condition.glyph(),
            })
            .collect(),
    }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
