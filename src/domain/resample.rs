//! Resampling of daily closes into weekly and monthly series.
//!
//! Each resampled period is represented by its first trading day. Monthly
//! periods carry the sum of every dividend paid during the calendar month;
//! daily and weekly observations never carry dividends.

use chrono::{Datelike, NaiveDate};

use super::observation::{Granularity, PriceObservation};

/// A single daily close with the dividend paid that day (0 if none).
#[derive(Debug, Clone, PartialEq)]
pub struct DailyClose {
    pub date: NaiveDate,
    pub close: f64,
    pub dividend: f64,
}

/// Resample date-ascending daily closes to the requested granularity.
pub fn resample(daily: &[DailyClose], granularity: Granularity) -> Vec<PriceObservation> {
    match granularity {
        Granularity::Daily => daily
            .iter()
            .map(|d| PriceObservation::new(d.date, granularity, d.close, 0.0))
            .collect(),
        Granularity::Weekly => group_by(daily, |d| {
            let w = d.iso_week();
            (w.year(), w.week())
        })
        .into_iter()
        .map(|group| PriceObservation::new(group[0].date, granularity, group[0].close, 0.0))
        .collect(),
        Granularity::Monthly => group_by(daily, |d| (d.year(), d.month()))
            .into_iter()
            .map(|group| {
                let dividend: f64 = group.iter().map(|d| d.dividend).sum();
                PriceObservation::new(group[0].date, granularity, group[0].close, dividend)
            })
            .collect(),
    }
}

fn group_by<K, F>(daily: &[DailyClose], key: F) -> Vec<&[DailyClose]>
where
    K: PartialEq,
    F: Fn(NaiveDate) -> K,
{
    let mut groups = Vec::new();
    let mut start = 0;
    for i in 1..=daily.len() {
        if i == daily.len() || key(daily[i].date) != key(daily[start].date) {
            if start < i {
                groups.push(&daily[start..i]);
            }
            start = i;
        }
    }
    groups
}
