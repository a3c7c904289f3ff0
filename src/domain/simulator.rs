//! Recurring-investment simulation over a monthly price series.
//!
//! Running totals are carried in an immutable [`Holdings`] accumulator: each
//! period consumes the previous holdings and yields the next ones together
//! with the [`PortfolioState`] recorded for that period.
//!
//! Per period the order is fixed: contribution, then dividend, then a single
//! whole-share purchase pass.

use chrono::NaiveDate;

use super::error::CompounderError;
use super::observation::{validate_series, PriceObservation};

/// Contribution schedule for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentPlan {
    pub contribution: f64,
    pub initial_balance: f64,
}

/// Portfolio snapshot after one monthly period.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioState {
    pub period_key: String,
    pub display_label: String,
    pub date: NaiveDate,
    pub price: f64,
    pub shares_held: u64,
    pub cash_balance: f64,
    pub total_contributed: f64,
    pub total_dividends_received: f64,
    pub portfolio_value: f64,
}

/// Running totals threaded through the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Holdings {
    pub shares: u64,
    pub cash: f64,
    pub contributed: f64,
    pub dividends: f64,
}

impl Holdings {
    /// Holdings after depositing the initial balance and buying what it affords
    /// at the first period's price.
    pub fn seed(initial_balance: f64, first_price: f64) -> Self {
        let (shares, cash) = buy_whole_shares(initial_balance, first_price);
        Holdings {
            shares,
            cash,
            contributed: initial_balance,
            dividends: 0.0,
        }
    }

    pub fn value_at(&self, price: f64) -> f64 {
        self.shares as f64 * price + self.cash
    }

    /// Advance one period: contribute, collect dividends, buy once.
    pub fn step(self, obs: &PriceObservation, contribution: f64) -> (Holdings, PortfolioState) {
        let mut cash = self.cash + contribution;
        let contributed = self.contributed + contribution;

        let mut dividends = self.dividends;
        if obs.dividend_per_share > 0.0 && self.shares > 0 {
            let payout = obs.dividend_per_share * self.shares as f64;
            cash += payout;
            dividends += payout;
        }

        let (bought, remaining) = buy_whole_shares(cash, obs.price);
        cash = remaining;

        let next = Holdings {
            shares: self.shares + bought,
            cash,
            contributed,
            dividends,
        };

        let state = PortfolioState {
            period_key: obs.period_key.clone(),
            display_label: obs.display_label.clone(),
            date: obs.date,
            price: obs.price,
            shares_held: next.shares,
            cash_balance: next.cash,
            total_contributed: next.contributed,
            total_dividends_received: next.dividends,
            portfolio_value: next.value_at(obs.price),
        };

        (next, state)
    }
}

/// Spend `cash` on as many whole shares as it affords at `price`.
///
/// Returns `(shares, leftover)` with `0 <= leftover < price` whenever `cash >= 0`.
/// The floor quotient is corrected by at most one share in either direction so
/// that floating-point rounding in the division cannot break that bound.
pub fn buy_whole_shares(cash: f64, price: f64) -> (u64, f64) {
    if cash <= 0.0 {
        return (0, cash);
    }

    let mut shares = (cash / price).floor() as u64;
    let mut leftover = cash - shares as f64 * price;

    if leftover < 0.0 && shares > 0 {
        shares -= 1;
        leftover = cash - shares as f64 * price;
    }
    if leftover >= price {
        shares += 1;
        leftover = cash - shares as f64 * price;
    }
    if leftover < 0.0 {
        leftover = 0.0;
    }

    (shares, leftover)
}

/// Run the simulation over a monthly series, one state per period.
#[tracing::instrument(skip(monthly), fields(periods = monthly.len()))]
pub fn simulate(
    monthly: &[PriceObservation],
    plan: &InvestmentPlan,
) -> Result<Vec<PortfolioState>, CompounderError> {
    if !plan.contribution.is_finite() || plan.contribution < 0.0 {
        return Err(CompounderError::invalid_input(format!(
            "contribution must be non-negative (got {})",
            plan.contribution
        )));
    }
    if !plan.initial_balance.is_finite() || plan.initial_balance < 0.0 {
        return Err(CompounderError::invalid_input(format!(
            "initial balance must be non-negative (got {})",
            plan.initial_balance
        )));
    }
    validate_series(monthly)?;

    let seed = Holdings::seed(plan.initial_balance, monthly[0].price);
    let states: Vec<PortfolioState> = monthly
        .iter()
        .scan(seed, |holdings, obs| {
            let (next, state) = holdings.step(obs, plan.contribution);
            *holdings = next;
            Some(state)
        })
        .collect();

    if let Some(last) = states.last() {
        tracing::debug!(
            shares = last.shares_held,
            value = last.portfolio_value,
            contributed = last.total_contributed,
            "simulation complete"
        );
    }

    Ok(states)
}
