//! Price series provider port.

use crate::domain::error::CompounderError;
use crate::domain::observation::{Granularity, PriceObservation};
use chrono::NaiveDate;

pub trait DataPort {
    /// Date-ascending observations for `ticker` at `granularity` within
    /// `[start_date, end_date]`.
    fn fetch_series(
        &self,
        ticker: &str,
        granularity: Granularity,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceObservation>, CompounderError>;

    /// First date, last date and row count of the stored data, if any.
    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CompounderError>;
}
