//! Policy Trade CLI
//!
//! Command-line interface for simulating a single secondary-market trade

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use policy_trade::format::{format_hkd, format_percent, format_percent_value};
use policy_trade::{ScenarioRunner, SimulationResult, TradeParams};

#[derive(Parser, Debug)]
#[command(
    name = "policy_trade",
    version,
    about = "Secondary-market trade simulator for dividend-paying whole life policies"
)]
struct Args {
    /// Policy year the sale happens in
    #[arg(long, default_value_t = 10)]
    sale_year: u32,

    /// Seller premium over cash value, in percent
    #[arg(long, default_value_t = 5.0)]
    seller_premium: f64,

    /// Broker fee on the resale, in percent
    #[arg(long, default_value_t = 2.0)]
    broker_fee: f64,

    /// Load the policy value schedule from a CSV file instead of the
    /// built-in illustration
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Emit the full simulation result as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// Write the buyer projection table to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runner = match &args.schedule {
        Some(path) => ScenarioRunner::from_csv_path(path)
            .with_context(|| format!("failed to load schedule from {}", path.display()))?,
        None => ScenarioRunner::new(),
    };

    let params = TradeParams::new(args.sale_year, args.seller_premium, args.broker_fee).clamped();
    let result = runner.run(&params);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_report(&params, &result);

    if let Some(path) = &args.csv {
        write_projection_csv(path, &result)?;
        println!("\nBuyer projections written to: {}", path.display());
    }

    Ok(())
}

fn print_report(params: &TradeParams, result: &SimulationResult) {
    println!("Policy Trade Simulator v0.1.0");
    println!("=============================\n");

    println!("Transaction Settings:");
    println!("  Sale Year: {}", params.sale_year);
    println!("  Seller Premium over CV: {:.1}%", params.seller_premium_pct);
    println!("  Broker Fee: {:.1}%", params.broker_fee_pct);
    println!();

    if result.base_cash_value == 0.0 && result.buyer_projections.is_empty() {
        println!("No schedule data for sale year {}.", result.sale_year);
        return;
    }

    println!("Seller (Original Holder):");
    println!("  Cash Value at Sale: {}", format_hkd(result.base_cash_value));
    println!("  Receives: {}", format_hkd(result.seller_receive_amount));
    // Early sales sit below breakeven where an annualized rate reads
    // strangely, so show the plain total return there instead.
    if params.sale_year <= 6 {
        println!("  Total Return: {}", format_percent_value(result.seller_roi));
    } else {
        println!("  Exit IRR (annualized): {}", format_percent(result.seller_irr));
    }
    println!();

    println!("Broker (Middleman):");
    println!("  Pays Seller: {}", format_hkd(result.broker_cost));
    println!("  Commission: {}", format_hkd(result.broker_profit));
    println!();

    println!("Buyer (New Holder):");
    println!("  Entry Cost: {}", format_hkd(result.buyer_entry_cost));
    match result.buyer_breakeven_year() {
        Some(year) => println!("  Breakeven Surrender Year: {}", year),
        None => println!("  Breakeven Surrender Year: beyond schedule"),
    }
    println!();

    println!("Buyer Exit Projections:");
    println!(
        "{:>6} {:>6} {:>16} {:>16} {:>10}",
        "Year", "Held", "Cash Value", "Gain", "IRR"
    );
    println!("{}", "-".repeat(60));

    for projection in &result.buyer_projections {
        println!(
            "{:>6} {:>6} {:>16} {:>16} {:>10}",
            projection.surrender_year,
            projection.holding_years,
            format_hkd(projection.cash_value),
            format_hkd(projection.gain),
            format_percent(projection.irr),
        );
    }
}

fn write_projection_csv(path: &Path, result: &SimulationResult) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("unable to create {}", path.display()))?;

    // IRR field stays empty when the solver did not converge.
    writeln!(file, "SurrenderYear,YearsHeld,CashValue,Gain,IRR")?;
    for projection in &result.buyer_projections {
        match projection.irr {
            Some(rate) => writeln!(
                file,
                "{},{},{:.2},{:.2},{:.6}",
                projection.surrender_year,
                projection.holding_years,
                projection.cash_value,
                projection.gain,
                rate
            )?,
            None => writeln!(
                file,
                "{},{},{:.2},{:.2},",
                projection.surrender_year,
                projection.holding_years,
                projection.cash_value,
                projection.gain
            )?,
        }
    }

    Ok(())
}
