//! Forecast reduction: collapse the upstream list of 3-hour samples into one
//! representative entry per upcoming calendar day.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{Condition, DailyForecast, ForecastSample};

/// How many upcoming days the widget layout has cards for.
const FORECAST_DAYS: usize = 4;

/// Single-pass reduction over an ordered sample list. Buckets are keyed by
/// absolute local date; within a bucket the sample whose local hour is
/// closest to noon wins, with the earliest-encountered sample kept on an
/// exact tie. Buckets are emitted in first-seen order, days up to and
/// including `today` are dropped, and at most [`FORECAST_DAYS`] remain.
pub fn reduce(samples: &[ForecastSample], today: NaiveDate) -> Vec<DailyForecast> {
    let mut order: Vec<NaiveDate> = Vec::new();
    let mut best: HashMap<NaiveDate, &ForecastSample> = HashMap::new();

    for sample in samples {
        let replace = match best.get(&sample.local_date) {
            None => {
                order.push(sample.local_date);
                true
            }
            // Strict `<` keeps the earliest-encountered sample on a tie.
            Some(kept) => noon_distance(sample.local_hour) < noon_distance(kept.local_hour),
        };
        if replace {
            best.insert(sample.local_date, sample);
        }
    }

    order
        .into_iter()
        .filter(|date| *date > today)
        .take(FORECAST_DAYS)
        .map(|date| {
            let sample = best[&date];
            DailyForecast {
                date,
                temperature_c: sample.temperature_c.round() as i32,
                condition: Condition::from_label(&sample.condition),
            }
        })
        .collect()
}

fn noon_distance(hour: u32) -> u32 {
    hour.abs_diff(12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample(date: NaiveDate, hour: u32, temp: f64, condition: &str) -> ForecastSample {
        ForecastSample {
            timestamp_utc: Utc
                .from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap()),
            local_date: date,
            local_hour: hour,
            temperature_c: temp,
            condition: condition.to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn keeps_at_most_four_days_and_never_today() {
        let today = date(2026, 8, 30);
        let mut samples = Vec::new();
        for offset in 0..6 {
            let d = today + chrono::Days::new(offset);
            for hour in [0, 9, 12, 21] {
                samples.push(sample(d, hour, 20.0, "Clear"));
            }
        }

        let reduced = reduce(&samples, today);

        assert_eq!(reduced.len(), 4);
        assert!(reduced.iter().all(|f| f.date > today));
        assert_eq!(reduced[0].date, today + chrono::Days::new(1));
    }

    #[test]
    fn picks_sample_closest_to_noon() {
        let today = date(2026, 8, 30);
        let tomorrow = date(2026, 8, 31);
        let samples = vec![
            sample(tomorrow, 3, 10.0, "Rain"),
            sample(tomorrow, 9, 15.0, "Clouds"),
            sample(tomorrow, 12, 21.0, "Clear"),
            sample(tomorrow, 18, 17.0, "Rain"),
        ];

        let reduced = reduce(&samples, today);

        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].temperature_c, 21);
        assert_eq!(reduced[0].condition, Condition::Clear);
    }

    #[test]
    fn noon_tie_keeps_earliest_encountered() {
        let today = date(2026, 8, 30);
        let tomorrow = date(2026, 8, 31);
        // 9 and 15 are both 3 hours from noon.
        let samples = vec![
            sample(tomorrow, 9, 11.0, "Snow"),
            sample(tomorrow, 15, 19.0, "Clear"),
        ];

        let reduced = reduce(&samples, today);

        assert_eq!(reduced[0].temperature_c, 11);
        assert_eq!(reduced[0].condition, Condition::Snow);
    }

    #[test]
    fn temperatures_round_half_up() {
        let today = date(2026, 8, 30);
        let samples = vec![
            sample(date(2026, 8, 31), 12, 21.4, "Clear"),
            sample(date(2026, 9, 1), 12, 21.5, "Clear"),
        ];

        let reduced = reduce(&samples, today);

        assert_eq!(reduced[0].temperature_c, 21);
        assert_eq!(reduced[1].temperature_c, 22);
    }

    #[test]
    fn same_weekday_across_weeks_stays_separate() {
        let today = date(2026, 8, 24);
        // Both Tuesdays, one week apart.
        let samples = vec![
            sample(date(2026, 8, 25), 12, 20.0, "Clear"),
            sample(date(2026, 9, 1), 12, 25.0, "Rain"),
        ];

        let reduced = reduce(&samples, today);

        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0].day_name(), reduced[1].day_name());
        assert_ne!(reduced[0].date, reduced[1].date);
    }

    #[test]
    fn short_window_yields_short_result() {
        let today = date(2026, 8, 30);
        let samples = vec![sample(today, 12, 20.0, "Clear")];

        assert!(reduce(&samples, today).is_empty());
        assert!(reduce(&[], today).is_empty());
    }
}
