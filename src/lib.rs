//! Policy Trade - secondary-market trade simulator for dividend-paying whole life policies
//!
//! This library provides:
//! - Newton-Raphson IRR solving over cash-flow series
//! - Three-party trade economics (seller, broker, buyer)
//! - Buyer exit projections for every future surrender year
//! - Policy value schedules with CSV loading
//! - Batch scenario sweeps and AI-assisted deal commentary

pub mod analysis;
pub mod format;
pub mod policy;
pub mod scenario;
pub mod simulation;

// Re-export commonly used types
pub use policy::{PolicySchedule, PolicyYearRow};
pub use scenario::ScenarioRunner;
pub use simulation::{
    solve_irr, ConvergenceFailure, SimulationResult, TradeEngine, TradeParams,
};
