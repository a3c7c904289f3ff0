#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};
use compounder::domain::error::CompounderError;
use compounder::domain::observation::{Granularity, PriceObservation};
use compounder::domain::resample::{resample, DailyClose};
use compounder::ports::data_port::DataPort;
use std::collections::HashMap;

/// In-memory provider serving resampled daily closes per ticker.
pub struct MockDataPort {
    pub data: HashMap<String, Vec<DailyClose>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_days(mut self, ticker: &str, days: Vec<DailyClose>) -> Self {
        self.data.insert(ticker.to_string(), days);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(
        &self,
        ticker: &str,
        granularity: Granularity,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceObservation>, CompounderError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(CompounderError::upstream(reason.clone()));
        }
        let days: Vec<DailyClose> = self
            .data
            .get(ticker)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|d| d.date >= start_date && d.date <= end_date)
            .collect();
        if days.is_empty() {
            return Err(CompounderError::upstream(format!("no prices for {ticker}")));
        }
        Ok(resample(&days, granularity))
    }

    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CompounderError> {
        Ok(self.data.get(ticker).and_then(|days| {
            Some((days.first()?.date, days.last()?.date, days.len()))
        }))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn day(date: NaiveDate, close: f64, dividend: f64) -> DailyClose {
    DailyClose {
        date,
        close,
        dividend,
    }
}

/// Weekday closes from `start` for `count` trading days, rising by `drift` per
/// day. A dividend of `dividend` is paid on the 15th trading day of each
/// quarter-end month (Mar, Jun, Sep, Dec).
pub fn generate_days(
    start: NaiveDate,
    count: usize,
    start_price: f64,
    drift: f64,
    dividend: f64,
) -> Vec<DailyClose> {
    let mut days = Vec::with_capacity(count);
    let mut d = start;
    let mut month_day = 0;
    let mut month = start.month();
    while days.len() < count {
        if d.weekday().number_from_monday() <= 5 {
            if d.month() != month {
                month = d.month();
                month_day = 0;
            }
            month_day += 1;
            let pays = dividend > 0.0 && month % 3 == 0 && month_day == 15;
            let close = start_price + drift * days.len() as f64;
            days.push(day(d, close, if pays { dividend } else { 0.0 }));
        }
        d = d.succ_opt().unwrap();
    }
    days
}

/// One close on the first day of each month with the given prices.
pub fn monthly_days(start: NaiveDate, prices: &[f64]) -> Vec<DailyClose> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| day(start + chrono::Months::new(i as u32), p, 0.0))
        .collect()
}
