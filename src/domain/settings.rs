//! Run settings resolved from configuration.

use chrono::NaiveDate;
use std::path::PathBuf;

use super::observation::Granularity;
use super::pacer::Timing;
use super::simulator::InvestmentPlan;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data_dir: PathBuf,
    pub plan: InvestmentPlan,
    pub timing: Timing,
    pub granularity: Granularity,
    pub output_path: PathBuf,
}
