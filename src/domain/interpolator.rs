//! Projection of the monthly portfolio history onto a denser price series.
//!
//! Only monthly periods carry transactions. A denser point is joined to the
//! latest monthly state at or before it; points on a monthly boundary copy that
//! state, points inside a month revalue its holdings at the current price.

use chrono::NaiveDate;

use super::error::CompounderError;
use super::observation::{validate_series, PriceObservation};
use super::simulator::PortfolioState;

/// One instant of the animated series.
///
/// `shares_held` and `total_dividends_received` are only set on monthly
/// boundaries. The `month_*` fields always hold the figures of the monthly
/// state the point was joined to.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPoint {
    pub period_key: String,
    pub display_label: String,
    pub date: NaiveDate,
    pub price: f64,
    pub portfolio_value: f64,
    pub total_contributed: f64,
    pub shares_held: Option<u64>,
    pub total_dividends_received: Option<f64>,
    pub month_shares_held: u64,
    pub month_dividends_received: f64,
}

impl From<&PortfolioState> for DisplayPoint {
    fn from(state: &PortfolioState) -> Self {
        DisplayPoint {
            period_key: state.period_key.clone(),
            display_label: state.display_label.clone(),
            date: state.date,
            price: state.price,
            portfolio_value: state.portfolio_value,
            total_contributed: state.total_contributed,
            shares_held: Some(state.shares_held),
            total_dividends_received: Some(state.total_dividends_received),
            month_shares_held: state.shares_held,
            month_dividends_received: state.total_dividends_received,
        }
    }
}

/// Display series for monthly granularity: one point per state, all fields known.
pub fn from_states(states: &[PortfolioState]) -> Result<Vec<DisplayPoint>, CompounderError> {
    if states.is_empty() {
        return Err(CompounderError::invalid_input("portfolio history is empty"));
    }
    Ok(states.iter().map(DisplayPoint::from).collect())
}

/// Index of the latest state dated on or before `date`, if any.
///
/// `states` must be sorted by date.
pub fn last_known_state(states: &[PortfolioState], date: NaiveDate) -> Option<usize> {
    states.partition_point(|s| s.date <= date).checked_sub(1)
}

/// Build a display point for every observation of the denser series.
#[tracing::instrument(skip(dense, states), fields(points = dense.len(), months = states.len()))]
pub fn interpolate(
    dense: &[PriceObservation],
    states: &[PortfolioState],
) -> Result<Vec<DisplayPoint>, CompounderError> {
    if states.is_empty() {
        return Err(CompounderError::invalid_input("portfolio history is empty"));
    }
    validate_series(dense)?;

    dense
        .iter()
        .map(|obs| {
            let idx = last_known_state(states, obs.date).ok_or_else(|| {
                CompounderError::invalid_input(format!(
                    "{} precedes the first monthly period ({})",
                    obs.date, states[0].date
                ))
            })?;
            Ok(project(obs, &states[idx]))
        })
        .collect()
}

fn project(obs: &PriceObservation, state: &PortfolioState) -> DisplayPoint {
    if obs.date == state.date {
        return DisplayPoint {
            period_key: obs.period_key.clone(),
            display_label: obs.display_label.clone(),
            date: obs.date,
            price: obs.price,
            portfolio_value: state.portfolio_value,
            total_contributed: state.total_contributed,
            shares_held: Some(state.shares_held),
            total_dividends_received: Some(state.total_dividends_received),
            month_shares_held: state.shares_held,
            month_dividends_received: state.total_dividends_received,
        };
    }

    DisplayPoint {
        period_key: obs.period_key.clone(),
        display_label: obs.display_label.clone(),
        date: obs.date,
        price: obs.price,
        portfolio_value: state.shares_held as f64 * obs.price + state.cash_balance,
        total_contributed: state.total_contributed,
        shares_held: None,
        total_dividends_received: None,
        month_shares_held: state.shares_held,
        month_dividends_received: state.total_dividends_received,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::Granularity;
    use crate::domain::simulator::{simulate, InvestmentPlan};
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn states() -> Vec<PortfolioState> {
        let monthly = vec![
            PriceObservation::new(date(2020, 1, 2), Granularity::Monthly, 10.0, 0.0),
            PriceObservation::new(date(2020, 2, 3), Granularity::Monthly, 12.0, 0.0),
        ];
        let plan = InvestmentPlan {
            contribution: 105.0,
            initial_balance: 0.0,
        };
        simulate(&monthly, &plan).unwrap()
    }

    fn daily(entries: &[(NaiveDate, f64)]) -> Vec<PriceObservation> {
        entries
            .iter()
            .map(|&(d, p)| PriceObservation::new(d, Granularity::Daily, p, 0.0))
            .collect()
    }

    #[test]
    fn boundary_point_copies_monthly_state_exactly() {
        let states = states();
        let dense = daily(&[(date(2020, 1, 2), 10.0), (date(2020, 2, 3), 12.0)]);
        let points = interpolate(&dense, &states).unwrap();

        for (p, s) in points.iter().zip(states.iter()) {
            assert_eq!(p.portfolio_value.to_bits(), s.portfolio_value.to_bits());
            assert_eq!(p.shares_held, Some(s.shares_held));
            assert_eq!(
                p.total_dividends_received,
                Some(s.total_dividends_received)
            );
            assert_eq!(p.total_contributed, s.total_contributed);
        }
    }

    #[test]
    fn intra_month_point_revalues_last_holdings() {
        let states = states();
        // Jan: 10 shares, cash 5
        let dense = daily(&[(date(2020, 1, 2), 10.0), (date(2020, 1, 15), 11.0)]);
        let points = interpolate(&dense, &states).unwrap();

        assert_relative_eq!(points[1].portfolio_value, 10.0 * 11.0 + 5.0);
        assert_relative_eq!(points[1].total_contributed, 105.0);
        assert_eq!(points[1].shares_held, None);
        assert_eq!(points[1].total_dividends_received, None);
        assert_eq!(points[1].month_shares_held, states[0].shares_held);
        assert_relative_eq!(points[1].price, 11.0);
        assert_eq!(points[1].display_label, "Jan 15, 2020");
    }

    #[test]
    fn contributions_only_change_on_boundaries() {
        let states = states();
        let dense = daily(&[
            (date(2020, 1, 2), 10.0),
            (date(2020, 1, 20), 10.5),
            (date(2020, 1, 31), 11.5),
            (date(2020, 2, 3), 12.0),
            (date(2020, 2, 14), 12.5),
        ]);
        let points = interpolate(&dense, &states).unwrap();
        assert_relative_eq!(points[1].total_contributed, states[0].total_contributed);
        assert_relative_eq!(points[2].total_contributed, states[0].total_contributed);
        assert_relative_eq!(points[3].total_contributed, states[1].total_contributed);
        assert_relative_eq!(points[4].total_contributed, states[1].total_contributed);
    }

    #[test]
    fn point_without_boundary_still_knows_its_month() {
        let states = states();
        // No point on Feb 3: the Feb 10 point must still report Feb holdings.
        let dense = daily(&[(date(2020, 1, 2), 10.0), (date(2020, 2, 10), 13.0)]);
        let points = interpolate(&dense, &states).unwrap();

        assert_eq!(points[1].shares_held, None);
        assert_eq!(points[1].month_shares_held, states[1].shares_held);
        assert_relative_eq!(
            points[1].portfolio_value,
            states[1].shares_held as f64 * 13.0 + states[1].cash_balance
        );
    }

    #[test]
    fn point_before_first_month_fails() {
        let states = states();
        let dense = daily(&[(date(2019, 12, 31), 9.0), (date(2020, 1, 2), 10.0)]);
        let err = interpolate(&dense, &states).unwrap_err();
        assert!(matches!(err, CompounderError::InvalidInput { .. }));
    }

    #[test]
    fn empty_inputs_fail() {
        let states = states();
        assert!(interpolate(&[], &states).is_err());
        let dense = daily(&[(date(2020, 1, 2), 10.0)]);
        assert!(interpolate(&dense, &[]).is_err());
    }

    #[test]
    fn last_known_state_never_looks_ahead() {
        let states = states();
        assert_eq!(last_known_state(&states, date(2020, 1, 1)), None);
        assert_eq!(last_known_state(&states, date(2020, 1, 2)), Some(0));
        assert_eq!(last_known_state(&states, date(2020, 2, 2)), Some(0));
        assert_eq!(last_known_state(&states, date(2020, 2, 3)), Some(1));
        assert_eq!(last_known_state(&states, date(2021, 1, 1)), Some(1));
    }

    #[test]
    fn from_states_keeps_every_field() {
        let states = states();
        let points = from_states(&states).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].shares_held, Some(states[1].shares_held));
        assert_eq!(points[1].display_label, "Feb 2020");
        assert!(from_states(&[]).is_err());
    }
}
