//! Projection of raw hourly/daily arrays into fixed-length display series.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::{
    condition::classify,
    locale::Locale,
    model::{ConditionCode, DailyPoint, HourlyPoint},
};

pub const HOURLY_POINTS: usize = 24;
pub const DAILY_POINTS: usize = 7;

const LOCAL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build exactly [`HOURLY_POINTS`] hourly points.
///
/// Longer input is truncated. Shorter input is padded by repeating the last
/// real values under consecutive hour labels.
pub fn project_hourly(
    times: &[String],
    temperatures: &[Option<f64>],
    precipitation_probabilities: &[Option<f64>],
    codes: &[Option<i32>],
) -> Vec<HourlyPoint> {
    let mut points = Vec::with_capacity(HOURLY_POINTS);
    let mut last_hour: Option<u32> = None;
    let mut last_values: Option<(i32, u8, ConditionCode)> = None;

    for i in 0..HOURLY_POINTS {
        let next_hour = last_hour.map_or(i as u32 % 24, |h| (h + 1) % 24);

        let (hour, values) = match times.get(i) {
            Some(time) => {
                let hour = NaiveDateTime::parse_from_str(time, LOCAL_TIME_FORMAT)
                    .map(|t| t.hour())
                    .unwrap_or(next_hour);
                let values = (
                    round_temp(value_at(temperatures, i)),
                    percentage(value_at(precipitation_probabilities, i)),
                    classify(code_at(codes, i)).condition,
                );
                (hour, values)
            }
            None => (next_hour, last_values.unwrap_or((0, 0, classify(0).condition))),
        };

        points.push(HourlyPoint {
            label: format!("{hour:02}:00"),
            temperature: values.0,
            precipitation_chance: values.1,
            condition: values.2,
        });

        last_hour = Some(hour);
        last_values = Some(values);
    }

    points
}

/// Build exactly [`DAILY_POINTS`] daily points, padded the same way as the hourly series.
pub fn project_daily(
    dates: &[String],
    min_temperatures: &[Option<f64>],
    max_temperatures: &[Option<f64>],
    precipitation_probabilities: &[Option<f64>],
    codes: &[Option<i32>],
    locale: Locale,
) -> Vec<DailyPoint> {
    let mut points = Vec::with_capacity(DAILY_POINTS);
    let mut last_date: Option<NaiveDate> = None;
    let mut last_values: Option<(i32, i32, u8, ConditionCode)> = None;

    for i in 0..DAILY_POINTS {
        let next_date = last_date.and_then(|d| d.succ_opt());

        let (date, values) = match dates.get(i) {
            Some(raw) => {
                let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok().or(next_date);
                let values = (
                    round_temp(value_at(min_temperatures, i)),
                    round_temp(value_at(max_temperatures, i)),
                    percentage(value_at(precipitation_probabilities, i)),
                    classify(code_at(codes, i)).condition,
                );
                (date, values)
            }
            None => (next_date, last_values.unwrap_or((0, 0, 0, classify(0).condition))),
        };

        points.push(DailyPoint {
            day_label: day_label(date, locale),
            min_temp: values.0,
            max_temp: values.1,
            precipitation_chance: values.2,
            condition: values.3,
        });

        last_date = date;
        last_values = Some(values);
    }

    points
}

/// Abbreviated weekday for a date, `-` when the date is unknown.
pub fn day_label(date: Option<NaiveDate>, locale: Locale) -> String {
    date.map_or_else(|| "-".to_string(), |d| locale.weekday_short(d.weekday()).to_string())
}

pub(crate) fn round_temp(value: f64) -> i32 {
    value.round() as i32
}

fn percentage(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

fn value_at(series: &[Option<f64>], i: usize) -> f64 {
    series.get(i).copied().flatten().filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn code_at(series: &[Option<i32>], i: usize) -> i32 {
    series.get(i).copied().flatten().unwrap_or(0)
}
