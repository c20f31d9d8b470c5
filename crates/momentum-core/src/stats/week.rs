//! Weekly progress percentage.
//!
//! A week is the fixed Monday-to-Sunday window containing the reference day.
//! Progress is the mean score over all seven days, with missing days counted
//! as 0.0, expressed as an integer percentage. Partway through the week the
//! percentage is therefore naturally low; it grows as days are filled in.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;

/// First day (Monday) of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(days_from_monday)
}

/// The seven days of the week containing `date`, Monday first.
pub fn week_window(date: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(date);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// Mean score over the week containing `as_of`, as a percentage in `0..=100`.
///
/// Rounding is half-up: `f64::round` rounds half away from zero and the
/// mean is never negative here, so 42.5 becomes 43.
pub fn week_progress(scores: &HashMap<NaiveDate, f64>, as_of: NaiveDate) -> u8 {
    let total: f64 = week_window(as_of)
        .iter()
        .map(|day| scores.get(day).copied().unwrap_or(0.0).clamp(0.0, 1.0))
        .sum();
    let percent = total / 7.0 * 100.0;
    (percent.round() as u8).min(100)
}
