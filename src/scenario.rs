//! Scenario runner for efficient batch simulations
//!
//! Pre-loads the policy schedule once, then allows running many trade
//! simulations with different parameters without re-reading CSV files.

use rayon::prelude::*;

use crate::policy::{self, PolicySchedule, ScheduleError};
use crate::simulation::{
    SimulationResult, TradeEngine, TradeParams, MAX_SALE_YEAR, MIN_SALE_YEAR,
};

/// Pre-loaded scenario runner for batch trade simulations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// for premium in [0.0, 5.0, 10.0] {
///     let result = runner.run(&TradeParams::new(10, premium, 2.0));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: TradeEngine,
}

impl ScenarioRunner {
    /// Create a runner with the built-in reference illustration
    pub fn new() -> Self {
        Self {
            engine: TradeEngine::new(PolicySchedule::default_illustration()),
        }
    }

    /// Create a runner by loading a schedule CSV
    pub fn from_csv_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ScheduleError> {
        Ok(Self::with_schedule(policy::load_schedule(path)?))
    }

    /// Create a runner with a pre-built schedule
    pub fn with_schedule(schedule: PolicySchedule) -> Self {
        Self {
            engine: TradeEngine::new(schedule),
        }
    }

    /// Run a single simulation with the given parameters
    pub fn run(&self, params: &TradeParams) -> SimulationResult {
        self.engine.simulate(params)
    }

    /// Run many parameter sets in parallel; results keep input order
    pub fn run_many(&self, params: &[TradeParams]) -> Vec<SimulationResult> {
        params
            .par_iter()
            .map(|params| self.engine.simulate(params))
            .collect()
    }

    /// Simulate every supported sale year in the schedule with the same
    /// percentages. Each year's params are clamped to that year's caps.
    pub fn sweep_sale_years(
        &self,
        seller_premium_pct: f64,
        broker_fee_pct: f64,
    ) -> Vec<SimulationResult> {
        let params: Vec<TradeParams> = self
            .engine
            .schedule()
            .rows()
            .iter()
            .map(|row| row.year)
            .filter(|year| (MIN_SALE_YEAR..=MAX_SALE_YEAR).contains(year))
            .map(|year| TradeParams::new(year, seller_premium_pct, broker_fee_pct).clamped())
            .collect();

        self.run_many(&params)
    }

    /// The schedule backing this runner
    pub fn schedule(&self) -> &PolicySchedule {
        self.engine.schedule()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_covers_supported_years() {
        let runner = ScenarioRunner::new();
        let results = runner.sweep_sale_years(5.0, 2.0);

        assert_eq!(results.len(), 24);
        assert_eq!(results.first().map(|r| r.sale_year), Some(2));
        assert_eq!(results.last().map(|r| r.sale_year), Some(25));
        for pair in results.windows(2) {
            assert_eq!(pair[1].sale_year, pair[0].sale_year + 1);
        }
    }

    #[test]
    fn test_run_many_keeps_order() {
        let runner = ScenarioRunner::new();
        let params = vec![
            TradeParams::new(15, 5.0, 2.0),
            TradeParams::new(10, 5.0, 2.0),
            TradeParams::new(20, 5.0, 2.0),
        ];

        let batch = runner.run_many(&params);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].sale_year, 15);
        assert_eq!(batch[1].sale_year, 10);
        assert_eq!(batch[2].sale_year, 20);

        // Batch results match single runs.
        let single = runner.run(&params[1]);
        assert_eq!(batch[1].seller_receive_amount, single.seller_receive_amount);
        assert_eq!(batch[1].buyer_entry_cost, single.buyer_entry_cost);
    }

    #[test]
    fn test_higher_premium_means_higher_proceeds() {
        let runner = ScenarioRunner::new();
        let low = runner.run(&TradeParams::new(10, 2.0, 2.0));
        let high = runner.run(&TradeParams::new(10, 8.0, 2.0));

        assert!(high.seller_receive_amount > low.seller_receive_amount);
        assert!(high.buyer_entry_cost > low.buyer_entry_cost);
    }
}
