//! Price observations and series granularity.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::error::CompounderError;

/// Sampling granularity of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl FromStr for Granularity {
    type Err = CompounderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "1d" => Ok(Granularity::Daily),
            "weekly" | "1wk" => Ok(Granularity::Weekly),
            "monthly" | "1mo" => Ok(Granularity::Monthly),
            other => Err(CompounderError::invalid_input(format!(
                "unknown granularity '{other}', expected daily, weekly or monthly"
            ))),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

/// One sampled instant of a price series.
///
/// `date` is the period start and doubles as the series timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceObservation {
    pub period_key: String,
    pub display_label: String,
    pub date: NaiveDate,
    pub price: f64,
    pub dividend_per_share: f64,
}

impl PriceObservation {
    /// Build an observation with labels derived from `date` and `granularity`.
    pub fn new(date: NaiveDate, granularity: Granularity, price: f64, dividend: f64) -> Self {
        PriceObservation {
            period_key: period_key(date),
            display_label: display_label(date, granularity),
            date,
            price,
            dividend_per_share: dividend,
        }
    }
}

/// Calendar-month label, e.g. "Jan 2020".
pub fn period_key(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Human label for an instant at the given granularity.
pub fn display_label(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Monthly => date.format("%b %Y").to_string(),
        Granularity::Weekly | Granularity::Daily => date.format("%b %-d, %Y").to_string(),
    }
}

/// Reject empty series, non-increasing dates, non-positive prices and
/// negative dividends.
pub fn validate_series(series: &[PriceObservation]) -> Result<(), CompounderError> {
    if series.is_empty() {
        return Err(CompounderError::invalid_input("price series is empty"));
    }

    for (i, obs) in series.iter().enumerate() {
        if !obs.price.is_finite() || obs.price <= 0.0 {
            return Err(CompounderError::invalid_input(format!(
                "price must be positive at {} (got {})",
                obs.date, obs.price
            )));
        }
        if !obs.dividend_per_share.is_finite() || obs.dividend_per_share < 0.0 {
            return Err(CompounderError::invalid_input(format!(
                "dividend must be non-negative at {} (got {})",
                obs.date, obs.dividend_per_share
            )));
        }
        if i > 0 && series[i - 1].date >= obs.date {
            return Err(CompounderError::invalid_input(format!(
                "series is not strictly increasing at {} (previous {})",
                obs.date,
                series[i - 1].date
            )));
        }
    }

    Ok(())
}
