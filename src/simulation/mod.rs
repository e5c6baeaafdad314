//! Trade simulation: IRR solver, cash-flow construction, three-party engine

mod cashflows;
mod engine;
mod irr;

pub use cashflows::{buyer_cashflows, seller_cashflows};
pub use engine::{
    max_seller_premium_pct, BuyerProjection, SimulationResult, TradeEngine, TradeParams,
    MAX_BROKER_FEE_PCT, MAX_SALE_YEAR, MIN_SALE_YEAR,
};
pub use irr::{solve_irr, solve_irr_with_guess, ConvergenceFailure, DEFAULT_INITIAL_GUESS};
