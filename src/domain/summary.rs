//! End-of-run summary figures.

use super::simulator::PortfolioState;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub periods: usize,
    pub final_value: f64,
    pub total_contributed: f64,
    pub total_dividends: f64,
    pub shares_held: u64,
    pub cash_balance: f64,
    /// final_value - total_contributed
    pub gain: f64,
    /// gain / total_contributed, 0 when nothing was contributed
    pub total_return: f64,
}

impl Summary {
    pub fn compute(states: &[PortfolioState]) -> Option<Summary> {
        let last = states.last()?;
        let gain = last.portfolio_value - last.total_contributed;
        let total_return = if last.total_contributed > 0.0 {
            gain / last.total_contributed
        } else {
            0.0
        };

        Some(Summary {
            periods: states.len(),
            final_value: last.portfolio_value,
            total_contributed: last.total_contributed,
            total_dividends: last.total_dividends_received,
            shares_held: last.shares_held,
            cash_balance: last.cash_balance,
            gain,
            total_return,
        })
    }
}
