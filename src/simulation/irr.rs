//! Internal Rate of Return (IRR) solver
//!
//! Newton-Raphson root finding over the net present value function. Both the
//! seller's realized return and every buyer exit projection go through this
//! solver, so its numeric behavior is pinned down tightly by tests.

use thiserror::Error;

/// Initial guess used when the caller has no better seed (10% annual).
pub const DEFAULT_INITIAL_GUESS: f64 = 0.1;

const TOLERANCE: f64 = 1e-7;
const MAX_ITERATIONS: usize = 1000;
const DERIVATIVE_NUDGE: f64 = 0.001;
const DIVERGENCE_BOUND: f64 = 10.0;

/// The solver gave up without finding a root of the NPV function.
///
/// Either the Newton step diverged past the rate bound or the iteration
/// budget ran out. Callers must surface this as "not available" rather than
/// collapsing it to a zero rate.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("IRR did not converge after {iterations} iterations (last rate {last_rate})")]
pub struct ConvergenceFailure {
    /// Iterations consumed before giving up.
    pub iterations: usize,
    /// Rate held when the solver stopped. Diverged or NaN values are
    /// reported as-is for diagnostics.
    pub last_rate: f64,
}

/// Solve for the Internal Rate of Return of a cash-flow series using the
/// Newton-Raphson method with the default initial guess.
///
/// # Arguments
/// * `cashflows` - One entry per period (positive = inflow, negative =
///   outflow); the period-0 entry is undiscounted
///
/// # Returns
/// * `Ok(rate)` - periodic rate `r` with `|NPV(r)| < 1e-7`
/// * `Err(ConvergenceFailure)` - no root found within the iteration budget
pub fn solve_irr(cashflows: &[f64]) -> Result<f64, ConvergenceFailure> {
    solve_irr_with_guess(cashflows, DEFAULT_INITIAL_GUESS)
}

/// Solve for the IRR starting from an explicit initial guess.
///
/// The iteration is a fixed, deliberately simple scheme:
/// converge when `|NPV| < 1e-7`; when the derivative is flat (`|NPV'| <
/// 1e-7`) nudge the rate by +0.001 and retry instead of dividing; abort as
/// diverged when a Newton step lands outside `|rate| <= 10`; give up after
/// 1000 iterations. A series that never crosses zero (all-negative,
/// single-element) exhausts the budget through the nudge path. An all-zero
/// series has `NPV == 0` everywhere and returns the guess unchanged.
///
/// NaN inputs are safe: every comparison on NaN fails, so the loop neither
/// converges nor panics and the budget runs out normally.
pub fn solve_irr_with_guess(
    cashflows: &[f64],
    initial_guess: f64,
) -> Result<f64, ConvergenceFailure> {
    let mut rate = initial_guess;

    for iteration in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if npv.abs() < TOLERANCE {
            return Ok(rate);
        }

        // Flat spot: a Newton step would blow up, move off it and retry.
        if dnpv.abs() < TOLERANCE {
            rate += DERIVATIVE_NUDGE;
            continue;
        }

        let new_rate = rate - npv / dnpv;

        if new_rate.abs() > DIVERGENCE_BOUND {
            return Err(ConvergenceFailure {
                iterations: iteration + 1,
                last_rate: new_rate,
            });
        }

        rate = new_rate;
    }

    Err(ConvergenceFailure {
        iterations: MAX_ITERATIONS,
        last_rate: rate,
    })
}

/// NPV and its derivative with respect to the rate, in one pass.
///
/// `NPV(r) = sum(cf[t] / (1+r)^t)`, `NPV'(r) = sum(-t * cf[t] / (1+r)^(t+1))`.
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / (discount * (1.0 + rate));
        }
    }

    (npv, dnpv)
}
