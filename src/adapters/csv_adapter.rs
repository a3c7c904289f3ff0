//! CSV file price data adapter.
//!
//! Reads `<base_path>/<TICKER>.csv` with a `date,close[,dividend]` header,
//! one row per trading day in ascending date order, and resamples to the
//! requested granularity.

use crate::domain::error::CompounderError;
use crate::domain::observation::{Granularity, PriceObservation};
use crate::domain::resample::{resample, DailyClose};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker.to_uppercase()))
    }

    fn read_daily(&self, ticker: &str) -> Result<Vec<DailyClose>, CompounderError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| {
            CompounderError::upstream(format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut rows = Vec::new();

        for (line, result) in rdr.records().enumerate() {
            let record = result
                .map_err(|e| CompounderError::upstream(format!("CSV parse error: {}", e)))?;

            let date_str = record
                .get(0)
                .ok_or_else(|| CompounderError::upstream("missing date column"))?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                CompounderError::upstream(format!("invalid date format: {}", e))
            })?;

            let close: f64 = record
                .get(1)
                .ok_or_else(|| CompounderError::upstream("missing close column"))?
                .trim()
                .parse()
                .map_err(|e| {
                    CompounderError::upstream(format!("invalid close value on {}: {}", date, e))
                })?;
            if !close.is_finite() || close <= 0.0 {
                return Err(CompounderError::upstream(format!(
                    "no usable price on {} (row {})",
                    date,
                    line + 1
                )));
            }

            let dividend: f64 = match record.get(2).map(str::trim) {
                None | Some("") => 0.0,
                Some(s) => s.parse().map_err(|e| {
                    CompounderError::upstream(format!("invalid dividend value on {}: {}", date, e))
                })?,
            };
            if !dividend.is_finite() || dividend < 0.0 {
                return Err(CompounderError::upstream(format!(
                    "invalid dividend {} on {} (row {})",
                    dividend,
                    date,
                    line + 1
                )));
            }

            let prev = rows.last().map(|r: &DailyClose| r.date);
            if let Some(prev) = prev.filter(|&p| date <= p) {
                return Err(CompounderError::upstream(format!(
                    "row {} dated {} does not follow {}",
                    line + 1,
                    date,
                    prev
                )));
            }

            rows.push(DailyClose {
                date,
                close,
                dividend,
            });
        }

        Ok(rows)
    }
}

impl DataPort for CsvAdapter {
    fn fetch_series(
        &self,
        ticker: &str,
        granularity: Granularity,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceObservation>, CompounderError> {
        let daily: Vec<DailyClose> = self
            .read_daily(ticker)?
            .into_iter()
            .filter(|r| r.date >= start_date && r.date <= end_date)
            .collect();

        if daily.is_empty() {
            return Err(CompounderError::upstream(format!(
                "no prices for {} between {} and {}",
                ticker, start_date, end_date
            )));
        }

        Ok(resample(&daily, granularity))
    }

    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CompounderError> {
        let rows = self.read_daily(ticker)?;
        Ok(match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, rows.len())),
            _ => None,
        })
    }
}
