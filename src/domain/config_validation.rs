//! Configuration validation.
//!
//! Validates every config field before any data is fetched.

use crate::domain::error::CompounderError;
use crate::domain::observation::Granularity;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), CompounderError> {
    validate_ticker(config)?;
    validate_dates(config)?;
    validate_investment(config)?;
    validate_durations(config)?;
    validate_frame_rate(config)?;
    validate_granularity(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> CompounderError {
    CompounderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_ticker(config: &dyn ConfigPort) -> Result<(), CompounderError> {
    match config.get_string("data", "ticker") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(CompounderError::ConfigMissing {
            section: "data".to_string(),
            key: "ticker".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), CompounderError> {
    let start_str = config.get_string("data", "start_date");
    let end_str = config.get_string("data", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(invalid(
            "data",
            "start_date",
            "start_date must be before end_date",
        ));
    }
    Ok(())
}

pub fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, CompounderError> {
    match value {
        None => Err(CompounderError::ConfigMissing {
            section: "data".to_string(),
            key: field.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            invalid(
                "data",
                field,
                &format!("invalid {} format, expected YYYY-MM-DD", field),
            )
        }),
    }
}

fn validate_investment(config: &dyn ConfigPort) -> Result<(), CompounderError> {
    for key in ["contribution", "initial_balance"] {
        let value = config.get_double("investment", key, 0.0)?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(
                "investment",
                key,
                &format!("{key} must be non-negative"),
            ));
        }
    }
    Ok(())
}

fn validate_durations(config: &dyn ConfigPort) -> Result<(), CompounderError> {
    for (key, default) in [("chart_duration", 20.0), ("ending_duration", 3.0)] {
        let value = config.get_double("animation", key, default)?;
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid("animation", key, &format!("{key} must be positive")));
        }
    }
    Ok(())
}

fn validate_frame_rate(config: &dyn ConfigPort) -> Result<(), CompounderError> {
    let value = config.get_int("animation", "frame_rate", 30)?;
    if value < 1 || value > u32::MAX as i64 {
        return Err(invalid(
            "animation",
            "frame_rate",
            "frame_rate must be a positive integer",
        ));
    }
    Ok(())
}

fn validate_granularity(config: &dyn ConfigPort) -> Result<(), CompounderError> {
    if let Some(s) = config.get_string("animation", "granularity") {
        s.parse::<Granularity>().map_err(|_| {
            invalid(
                "animation",
                "granularity",
                "granularity must be daily, weekly or monthly",
            )
        })?;
    }
    Ok(())
}
