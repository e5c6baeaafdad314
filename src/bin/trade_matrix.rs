//! Sweep every supported sale year and tabulate the trade outcomes
//!
//! Supports JSON output for API integration via --json flag
//! Accepts config via environment variables:
//!   SELLER_PREMIUM_PCT, BROKER_FEE_PCT, SCHEDULE_PATH

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::env;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use policy_trade::format::{format_hkd, format_percent};
use policy_trade::{ScenarioRunner, SimulationResult};

#[derive(Serialize)]
struct MatrixResponse {
    seller_premium_pct: f64,
    broker_fee_pct: f64,
    sale_years: usize,
    results: Vec<SimulationResult>,
    generated_at: String,
    execution_time_ms: u64,
}

fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let start = Instant::now();

    // Read config from environment or use defaults
    let seller_premium_pct: f64 = env::var("SELLER_PREMIUM_PCT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5.0);

    let broker_fee_pct: f64 = env::var("BROKER_FEE_PCT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2.0);

    let schedule_path = env::var("SCHEDULE_PATH").ok();

    let runner = match &schedule_path {
        Some(path) => ScenarioRunner::from_csv_path(path)
            .with_context(|| format!("failed to load schedule from {}", path))?,
        None => ScenarioRunner::new(),
    };

    if !json_output {
        println!("Policy Trade Matrix v0.1.0");
        println!("==========================\n");
        match &schedule_path {
            Some(path) => println!("Schedule: {}", path),
            None => println!(
                "Schedule: built-in illustration ({} years)",
                runner.schedule().len()
            ),
        }
        println!(
            "Seller Premium: {:.1}%   Broker Fee: {:.1}%\n",
            seller_premium_pct, broker_fee_pct
        );
        println!("Running sale year sweep...");
    }

    let sweep_start = Instant::now();
    let results = runner.sweep_sale_years(seller_premium_pct, broker_fee_pct);

    if !json_output {
        println!(
            "{} sale years simulated in {:?}\n",
            results.len(),
            sweep_start.elapsed()
        );
    }

    let csv_path = "trade_matrix_output.csv";
    write_matrix_csv(csv_path, &results)?;

    let execution_time_ms = start.elapsed().as_millis() as u64;

    if json_output {
        let response = MatrixResponse {
            seller_premium_pct,
            broker_fee_pct,
            sale_years: results.len(),
            results,
            generated_at: Utc::now().to_rfc3339(),
            execution_time_ms,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        print_matrix(&results);

        println!("\nMatrix written to: {}", csv_path);
        println!("Total time: {:?}", start.elapsed());
    }

    Ok(())
}

fn print_matrix(results: &[SimulationResult]) {
    println!(
        "{:>4} {:>14} {:>14} {:>10} {:>14} {:>10} {:>10}",
        "Year", "Cash Value", "Seller Gets", "S-IRR", "Buyer Entry", "Breakeven", "5y IRR"
    );
    println!("{}", "-".repeat(84));

    for result in results {
        let breakeven = result
            .buyer_breakeven_year()
            .map(|year| year.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:>4} {:>14} {:>14} {:>10} {:>14} {:>10} {:>10}",
            result.sale_year,
            format_hkd(result.base_cash_value),
            format_hkd(result.seller_receive_amount),
            format_percent(result.seller_irr),
            format_hkd(result.buyer_entry_cost),
            breakeven,
            format_percent(buyer_irr_at_hold(result, 5)),
        );
    }

    // Highlight the strongest buyer entry point
    let best = results
        .iter()
        .filter_map(|result| {
            buyer_irr_at_hold(result, 5).map(|irr| (result.sale_year, irr))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((sale_year, irr)) = best {
        println!("\n========================================");
        println!(
            "  BEST 5-YEAR BUYER IRR: {} (sale year {})",
            format_percent(Some(irr)),
            sale_year
        );
        println!("========================================");
    }
}

fn buyer_irr_at_hold(result: &SimulationResult, holding_years: u32) -> Option<f64> {
    result
        .projection_for_year(result.sale_year + holding_years)
        .and_then(|projection| projection.irr)
}

fn write_matrix_csv(path: &str, results: &[SimulationResult]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("unable to create {}", path))?;

    // Rate columns stay empty when the solver did not converge.
    writeln!(
        file,
        "SaleYear,CashValue,SellerReceives,SellerIRR,SellerROI,BrokerProfit,BuyerEntryCost,BreakevenYear,BuyerIRR5Y,BuyerIRR10Y"
    )?;

    for result in results {
        let seller_irr = result
            .seller_irr
            .map(|rate| format!("{:.6}", rate))
            .unwrap_or_default();
        let irr_5y = buyer_irr_at_hold(result, 5)
            .map(|rate| format!("{:.6}", rate))
            .unwrap_or_default();
        let irr_10y = buyer_irr_at_hold(result, 10)
            .map(|rate| format!("{:.6}", rate))
            .unwrap_or_default();
        let breakeven = result
            .buyer_breakeven_year()
            .map(|year| year.to_string())
            .unwrap_or_default();

        writeln!(
            file,
            "{},{:.2},{:.2},{},{:.6},{:.2},{:.2},{},{},{}",
            result.sale_year,
            result.base_cash_value,
            result.seller_receive_amount,
            seller_irr,
            result.seller_roi,
            result.broker_profit,
            result.buyer_entry_cost,
            breakeven,
            irr_5y,
            irr_10y,
        )?;
    }

    Ok(())
}
