//! Cash-flow series construction for the trade parties
//!
//! Sign convention: negative = outflow, positive = inflow. The series index
//! is the period number and period 0 is undiscounted, which is exactly what
//! the IRR solver expects.

use crate::policy::PolicySchedule;

/// Seller cash flows from policy inception through the sale.
///
/// One entry per policy year `1..=sale_year`, year 1 at index 0. Each entry
/// is that year's premium outflow taken from the schedule (zero when the
/// schedule has no premium or no row for the year), and the final entry
/// additionally receives the sale proceeds.
pub fn seller_cashflows(
    schedule: &PolicySchedule,
    sale_year: u32,
    receive_amount: f64,
) -> Vec<f64> {
    let mut flows: Vec<f64> = (1..=sale_year)
        .map(|year| match schedule.year(year) {
            Some(row) => -row.premium_paid_yearly,
            None => 0.0,
        })
        .collect();

    if let Some(last) = flows.last_mut() {
        *last += receive_amount;
    }

    flows
}

/// Buyer cash flows from entry through surrender:
/// `[-entry_cost, 0 x (holding_years - 1), +exit_value]`.
///
/// Length is `holding_years + 1`; callers pass `holding_years >= 1`.
pub fn buyer_cashflows(entry_cost: f64, holding_years: u32, exit_value: f64) -> Vec<f64> {
    let periods = holding_years as usize + 1;
    let mut flows = vec![0.0; periods];
    flows[0] = -entry_cost;
    flows[periods - 1] += exit_value;
    flows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{PolicySchedule, PolicyYearRow};

    #[test]
    fn test_seller_series_shape() {
        let schedule = PolicySchedule::default_illustration();
        let flows = seller_cashflows(&schedule, 10, 1_365_000.0);

        assert_eq!(flows.len(), 10);
        for year_flow in &flows[0..5] {
            assert_eq!(*year_flow, -200_000.0);
        }
        for year_flow in &flows[5..9] {
            assert_eq!(*year_flow, 0.0);
        }
        assert_eq!(flows[9], 1_365_000.0);
    }

    #[test]
    fn test_seller_sale_during_premium_period() {
        // Sale in year 3 lands the proceeds on top of that year's premium.
        let schedule = PolicySchedule::default_illustration();
        let flows = seller_cashflows(&schedule, 3, 500_000.0);

        assert_eq!(flows, vec![-200_000.0, -200_000.0, 300_000.0]);
    }

    #[test]
    fn test_seller_series_skips_missing_years() {
        let schedule = PolicySchedule::new(vec![
            PolicyYearRow {
                year: 1,
                premium_paid_yearly: 100_000.0,
                total_premium_paid: 100_000.0,
                guaranteed_cv: 20_000.0,
                total_cv: 40_000.0,
            },
            PolicyYearRow {
                year: 3,
                premium_paid_yearly: 50_000.0,
                total_premium_paid: 150_000.0,
                guaranteed_cv: 90_000.0,
                total_cv: 160_000.0,
            },
        ]);

        let flows = seller_cashflows(&schedule, 3, 200_000.0);
        assert_eq!(flows, vec![-100_000.0, 0.0, 150_000.0]);
    }

    #[test]
    fn test_buyer_series_shape() {
        let flows = buyer_cashflows(1_392_300.0, 5, 1_932_000.0);

        assert_eq!(flows.len(), 6);
        assert_eq!(flows[0], -1_392_300.0);
        for year_flow in &flows[1..5] {
            assert_eq!(*year_flow, 0.0);
        }
        assert_eq!(flows[5], 1_932_000.0);
    }

    #[test]
    fn test_buyer_single_year_hold() {
        let flows = buyer_cashflows(1_000_000.0, 1, 1_100_000.0);
        assert_eq!(flows, vec![-1_000_000.0, 1_100_000.0]);
    }
}
