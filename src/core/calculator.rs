//! Provides the investment return simulation for a single opportunity.
use crate::core::opportunity::Opportunity;

/// Nights granted per share per year, before the usage cap.
pub const NIGHTS_PER_SHARE: f64 = 30.0;

/// No owner may occupy a property for more than 30% of the year.
pub const MAX_YEAR_USAGE: f64 = 0.30;

/// Conservative nominal appreciation assumed for value projections.
pub const ANNUAL_APPRECIATION: f64 = 0.05;

/// Figures derived for one `(opportunity, share_count)` selection.
///
/// Monetary values are in USD; conversion to the display currency
/// happens at formatting time.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub ownership_pct: f64,
    pub investment_cost: f64,
    pub free_nights_per_year: u32,
    pub yearly_cash_return: f64,
    pub projected_value_5y: f64,
    pub projected_value_10y: f64,
}

/// Computes ownership, cost, free nights and projected returns for buying
/// `share_count` shares of `opportunity`.
///
/// Pure and total over its documented domain. Callers must guarantee
/// `1 <= share_count <= opportunity.total_shares` and a positive
/// `total_price`; the CLI layer enforces both before invoking this.
pub fn compute(opportunity: &Opportunity, share_count: u32) -> DerivedMetrics {
    let ownership_fraction = f64::from(share_count) / f64::from(opportunity.total_shares);
    let investment_cost = opportunity.total_price * ownership_fraction;

    let raw_nights = NIGHTS_PER_SHARE * f64::from(share_count);
    let max_nights = 365.0 * MAX_YEAR_USAGE;
    let free_nights = raw_nights.min(max_nights).floor() as u32;

    let yearly_cash_return = investment_cost * (opportunity.expected_roi_pct / 100.0);

    DerivedMetrics {
        ownership_pct: ownership_fraction * 100.0,
        investment_cost,
        free_nights_per_year: free_nights,
        yearly_cash_return,
        projected_value_5y: projected_value(investment_cost, 5),
        projected_value_10y: projected_value(investment_cost, 10),
    }
}

/// Projects an invested amount forward assuming fixed annual appreciation.
pub fn projected_value(investment_cost: f64, years: u32) -> f64 {
    investment_cost * (1.0 + ANNUAL_APPRECIATION).powi(years as i32)
}
