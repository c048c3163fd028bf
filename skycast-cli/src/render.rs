//! Terminal rendering of a [`DisplayModel`]: the widget layout flattened
//! into a few lines of text.

use std::fmt::Write as _;

use skycast_core::DisplayModel;

pub fn render(model: &DisplayModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}, {}", model.day_label, model.date_label);
    let _ = writeln!(out, "{}", model.location);
    let _ = writeln!(
        out,
        "{}  {}\u{a0}\u{b0}C  {}",
        model.icon, model.temperature_c, model.condition_text
    );
    let _ = writeln!(
        out,
        "clouds {}%  humidity {}%  wind {} km/h",
        model.cloud_cover_pct, model.humidity_pct, model.wind_kph
    );

    if !model.forecast.is_empty() {
        let _ = writeln!(out);
        for card in &model.forecast {
            let _ = writeln!(
                out,
                "{}  {}  {} \u{b0}C",
                card.day_label, card.icon, card.temperature_c
            );
        }
    }

    out
}
