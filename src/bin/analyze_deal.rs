//! AI deal commentary for a single trade scenario
//!
//! Runs one simulation, summarizes the economics for all three parties and
//! asks Gemini for a short written assessment of the deal. Requires the
//! GEMINI_API_KEY environment variable; without it a placeholder message is
//! printed instead of commentary.
//!
//! Parameters come from environment variables:
//!   SALE_YEAR           policy year the sale happens in (default 10)
//!   SELLER_PREMIUM_PCT  seller premium over cash value in percent (default 5)
//!   BROKER_FEE_PCT      broker fee in percent (default 2)
//!   SCHEDULE_PATH       optional CSV with a custom policy schedule

use std::env;

use anyhow::Context;

use policy_trade::analysis::{self, DealFacts};
use policy_trade::format::{format_hkd, format_percent};
use policy_trade::{ScenarioRunner, TradeParams};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let sale_year: u32 = env::var("SALE_YEAR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let seller_premium_pct: f64 = env::var("SELLER_PREMIUM_PCT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5.0);
    let broker_fee_pct: f64 = env::var("BROKER_FEE_PCT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2.0);

    let runner = match env::var("SCHEDULE_PATH") {
        Ok(path) => ScenarioRunner::from_csv_path(&path)
            .with_context(|| format!("failed to load schedule from {}", path))?,
        Err(_) => ScenarioRunner::new(),
    };

    let params = TradeParams::new(sale_year, seller_premium_pct, broker_fee_pct).clamped();
    let result = runner.run(&params);
    let facts = DealFacts::from_simulation(&result, runner.schedule());

    println!("Policy Trade Deal Analysis");
    println!("==========================");
    println!();
    println!("  Sale year:        {}", params.sale_year);
    println!("  Seller premium:   {:.1}%", params.seller_premium_pct);
    println!("  Broker fee:       {:.1}%", params.broker_fee_pct);
    println!();
    println!("  Seller receives:  {}", format_hkd(result.seller_receive_amount));
    println!("  Seller IRR:       {}", format_percent(result.seller_irr));
    println!("  Broker profit:    {}", format_hkd(result.broker_profit));
    println!("  Buyer entry cost: {}", format_hkd(result.buyer_entry_cost));
    println!();

    println!("Requesting commentary...");
    println!();

    let commentary = analysis::analyze_from_env(&facts).await;

    println!("{}", commentary);

    Ok(())
}
