//! Trade simulation engine
//!
//! Computes the economics of a secondary-market policy sale for all three
//! parties. The seller exits at total cash value plus a negotiated markup,
//! the broker takes a fee on the resale, and the buyer holds to some future
//! surrender year. Seller and buyer returns run through the IRR solver.

use serde::{Deserialize, Serialize};

use super::cashflows::{buyer_cashflows, seller_cashflows};
use super::irr::solve_irr;
use crate::policy::PolicySchedule;

/// Lowest supported sale year.
pub const MIN_SALE_YEAR: u32 = 2;
/// Highest supported sale year.
pub const MAX_SALE_YEAR: u32 = 25;
/// Broker fee cap in percent.
pub const MAX_BROKER_FEE_PCT: f64 = 10.0;

/// Cap on the seller premium for a given sale year: sales through year 6
/// allow up to 60%, later sales up to 10%.
pub fn max_seller_premium_pct(sale_year: u32) -> f64 {
    if sale_year <= 6 {
        60.0
    } else {
        10.0
    }
}

/// Adjustable trade parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TradeParams {
    /// Policy year the sale happens in
    pub sale_year: u32,

    /// Seller markup over total cash value, in percent
    pub seller_premium_pct: f64,

    /// Broker fee on the resale, in percent
    pub broker_fee_pct: f64,
}

impl TradeParams {
    pub fn new(sale_year: u32, seller_premium_pct: f64, broker_fee_pct: f64) -> Self {
        Self {
            sale_year,
            seller_premium_pct,
            broker_fee_pct,
        }
    }

    /// Clamp both percentages into their supported ranges for this sale
    /// year. The engine itself runs whatever it is given; entry points
    /// clamp first.
    pub fn clamped(mut self) -> Self {
        self.seller_premium_pct = self
            .seller_premium_pct
            .clamp(0.0, max_seller_premium_pct(self.sale_year));
        self.broker_fee_pct = self.broker_fee_pct.clamp(0.0, MAX_BROKER_FEE_PCT);
        self
    }
}

impl Default for TradeParams {
    fn default() -> Self {
        Self {
            sale_year: 10,
            seller_premium_pct: 5.0,
            broker_fee_pct: 2.0,
        }
    }
}

/// One buyer exit scenario: surrender in a given future policy year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyerProjection {
    /// Policy year of the surrender
    pub surrender_year: u32,

    /// Years between purchase and surrender
    pub holding_years: u32,

    /// Total cash value collected at surrender
    pub cash_value: f64,

    /// Cash value minus entry cost
    pub gain: f64,

    /// Annualized return over the holding period; `None` when the solver
    /// did not converge
    pub irr: Option<f64>,
}

/// Full three-party outcome of one simulated trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub sale_year: u32,

    /// Total cash value in the sale year
    pub base_cash_value: f64,

    /// Proceeds to the seller: cash value plus the premium markup
    pub seller_receive_amount: f64,

    /// Seller's annualized return from inception through the sale; `None`
    /// when the solver did not converge
    pub seller_irr: Option<f64>,

    /// Seller's total return on premium paid
    pub seller_roi: f64,

    /// What the broker pays the seller
    pub broker_cost: f64,

    /// Broker fee income on the resale
    pub broker_profit: f64,

    /// What the buyer pays: broker cost plus fee
    pub buyer_entry_cost: f64,

    /// One projection per schedule year after the sale
    pub buyer_projections: Vec<BuyerProjection>,
}

impl SimulationResult {
    /// Result for a sale year the schedule does not cover: every figure
    /// zero and no projections. Callers get a well-formed result instead of
    /// an error.
    pub fn degenerate(sale_year: u32) -> Self {
        Self {
            sale_year,
            base_cash_value: 0.0,
            seller_receive_amount: 0.0,
            seller_irr: Some(0.0),
            seller_roi: 0.0,
            broker_cost: 0.0,
            broker_profit: 0.0,
            buyer_entry_cost: 0.0,
            buyer_projections: Vec::new(),
        }
    }

    /// First future year where the buyer's surrender gain turns positive.
    pub fn buyer_breakeven_year(&self) -> Option<u32> {
        self.buyer_projections
            .iter()
            .find(|projection| projection.gain > 0.0)
            .map(|projection| projection.surrender_year)
    }

    /// Projection for an exact surrender year, if the schedule covers it.
    pub fn projection_for_year(&self, surrender_year: u32) -> Option<&BuyerProjection> {
        self.buyer_projections
            .iter()
            .find(|projection| projection.surrender_year == surrender_year)
    }
}

/// Simulation engine bound to a policy value schedule.
#[derive(Debug, Clone)]
pub struct TradeEngine {
    schedule: PolicySchedule,
}

impl TradeEngine {
    pub fn new(schedule: PolicySchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &PolicySchedule {
        &self.schedule
    }

    /// Run the three-party simulation.
    ///
    /// Pure and deterministic: identical params against the same schedule
    /// give identical results, so calls can run concurrently. A sale year
    /// missing from the schedule yields [`SimulationResult::degenerate`].
    pub fn simulate(&self, params: &TradeParams) -> SimulationResult {
        let row = match self.schedule.year(params.sale_year) {
            Some(row) => row,
            None => {
                log::debug!(
                    "sale year {} not in schedule, returning degenerate result",
                    params.sale_year
                );
                return SimulationResult::degenerate(params.sale_year);
            }
        };

        // Seller leg
        let receive_amount = row.total_cv * (1.0 + params.seller_premium_pct / 100.0);
        let seller_flows = seller_cashflows(&self.schedule, params.sale_year, receive_amount);
        let seller_irr = match solve_irr(&seller_flows) {
            Ok(rate) => Some(rate),
            Err(err) => {
                log::warn!("seller IRR failed for sale year {}: {}", params.sale_year, err);
                None
            }
        };
        let seller_roi = if row.total_premium_paid > 0.0 {
            (receive_amount - row.total_premium_paid) / row.total_premium_paid
        } else {
            0.0
        };

        // Broker leg
        let broker_cost = receive_amount;
        let buyer_entry_cost = broker_cost * (1.0 + params.broker_fee_pct / 100.0);
        let broker_profit = buyer_entry_cost - broker_cost;

        // Buyer leg: one exit scenario per future schedule year
        let buyer_projections = self
            .schedule
            .years_after(params.sale_year)
            .map(|future| {
                let holding_years = future.year - params.sale_year;
                let flows = buyer_cashflows(buyer_entry_cost, holding_years, future.total_cv);
                let irr = match solve_irr(&flows) {
                    Ok(rate) => Some(rate),
                    Err(err) => {
                        log::debug!(
                            "buyer IRR failed for surrender year {}: {}",
                            future.year,
                            err
                        );
                        None
                    }
                };

                BuyerProjection {
                    surrender_year: future.year,
                    holding_years,
                    cash_value: future.total_cv,
                    gain: future.total_cv - buyer_entry_cost,
                    irr,
                }
            })
            .collect();

        SimulationResult {
            sale_year: params.sale_year,
            base_cash_value: row.total_cv,
            seller_receive_amount: receive_amount,
            seller_irr,
            seller_roi,
            broker_cost,
            broker_profit,
            buyer_entry_cost,
            buyer_projections,
        }
    }
}
