//! Deal facts and analyst prompt rendering

use serde::{Deserialize, Serialize};

use crate::format::{format_hkd, format_percent};
use crate::policy::PolicySchedule;
use crate::simulation::SimulationResult;

/// Window of schedule years quoted to the analyst, starting at the sale year.
const CV_REFERENCE_YEARS: usize = 11;

/// The structured facts of one simulated trade, as handed to the language
/// model. Everything here is derived from a [`SimulationResult`]; the model
/// adds commentary, never numbers of record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealFacts {
    /// Policy year of the sale
    pub sale_year: u32,

    /// Gross amount the seller walks away with
    pub seller_sale_price: f64,

    /// Seller's realized IRR, when the solver converged
    pub seller_irr: Option<f64>,

    /// Total premium the original holder committed to the policy
    pub original_principal: f64,

    /// What the buyer pays to enter
    pub buyer_entry_cost: f64,

    /// Buyer's projected IRR at a 5-year hold, when the schedule reaches
    /// that far and the solver converged
    pub buyer_irr_5y: Option<f64>,

    /// Buyer's projected IRR at a 10-year hold
    pub buyer_irr_10y: Option<f64>,

    /// Broker's fee income on the trade
    pub broker_profit: f64,

    /// (year, total cash value) reference rows from the sale year forward
    pub cv_reference: Vec<(u32, f64)>,
}

impl DealFacts {
    /// Gather the analyst facts for a simulated trade.
    pub fn from_simulation(result: &SimulationResult, schedule: &PolicySchedule) -> Self {
        let irr_at_hold = |holding_years: u32| {
            result
                .projection_for_year(result.sale_year + holding_years)
                .and_then(|projection| projection.irr)
        };

        Self {
            sale_year: result.sale_year,
            seller_sale_price: result.broker_cost,
            seller_irr: result.seller_irr,
            original_principal: schedule
                .rows()
                .last()
                .map(|row| row.total_premium_paid)
                .unwrap_or(0.0),
            buyer_entry_cost: result.buyer_entry_cost,
            buyer_irr_5y: irr_at_hold(5),
            buyer_irr_10y: irr_at_hold(10),
            broker_profit: result.broker_profit,
            cv_reference: schedule
                .window(result.sale_year, CV_REFERENCE_YEARS)
                .iter()
                .map(|row| (row.year, row.total_cv))
                .collect(),
        }
    }
}

/// Render the analyst prompt for a set of deal facts.
pub fn build_prompt(facts: &DealFacts) -> String {
    let cv_lines = facts
        .cv_reference
        .iter()
        .map(|&(year, total_cv)| format!("- {}: {}", year, format_hkd(total_cv)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a sophisticated financial analyst specializing in secondary market life \
         insurance policies (Traded Endowment Policies).\n\
         \n\
         Please analyze the following transaction scenario:\n\
         \n\
         **Scenario:**\n\
         - Original Policy: 5-year pay, Dividend-paying Whole Life.\n\
         - Policy Age at Sale: {sale_year} years.\n\
         - Original Principal: {principal}.\n\
         \n\
         **Seller (Original Holder A):**\n\
         - Sale Price (Net): {sale_price}\n\
         - Exit IRR: {seller_irr}\n\
         \n\
         **Broker (Middleman B):**\n\
         - Transaction Profit: {broker_profit}\n\
         \n\
         **Buyer (New Holder C):**\n\
         - Entry Cost: {entry_cost}\n\
         - Projected IRR (if held for +5 more years): {irr_5y}\n\
         - Projected IRR (if held for +10 more years): {irr_10y}\n\
         \n\
         **Policy Data Reference (Year: Total Cash Value):**\n\
         {cv_lines}\n\
         \n\
         **Instructions:**\n\
         1. Evaluate if this is a good exit for the Seller compared to holding.\n\
         2. Evaluate the risk/reward for the Buyer given the entry cost and projected returns.\n\
         3. Comment on the Broker's cut - is it reasonable?\n\
         4. Provide a succinct verdict (Buy/Sell/Hold) for each party.\n\
         \n\
         Keep the response concise (under 200 words), professional, and formatted with markdown.",
        sale_year = facts.sale_year,
        principal = format_hkd(facts.original_principal),
        sale_price = format_hkd(facts.seller_sale_price),
        seller_irr = format_percent(facts.seller_irr),
        broker_profit = format_hkd(facts.broker_profit),
        entry_cost = format_hkd(facts.buyer_entry_cost),
        irr_5y = format_percent(facts.buyer_irr_5y),
        irr_10y = format_percent(facts.buyer_irr_10y),
        cv_lines = cv_lines,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicySchedule;
    use crate::simulation::{TradeEngine, TradeParams};

    fn sample_facts() -> DealFacts {
        DealFacts {
            sale_year: 10,
            seller_sale_price: 1_365_000.0,
            seller_irr: Some(0.0452),
            original_principal: 1_000_000.0,
            buyer_entry_cost: 1_392_300.0,
            buyer_irr_5y: Some(0.0677),
            buyer_irr_10y: Some(0.0734),
            broker_profit: 27_300.0,
            cv_reference: vec![(10, 1_300_000.0), (11, 1_410_000.0)],
        }
    }

    #[test]
    fn test_prompt_carries_the_facts() {
        let prompt = build_prompt(&sample_facts());

        assert!(prompt.contains("Policy Age at Sale: 10 years."));
        assert!(prompt.contains("Original Principal: HK$1,000,000."));
        assert!(prompt.contains("Sale Price (Net): HK$1,365,000"));
        assert!(prompt.contains("Exit IRR: 4.52%"));
        assert!(prompt.contains("Transaction Profit: HK$27,300"));
        assert!(prompt.contains("Entry Cost: HK$1,392,300"));
        assert!(prompt.contains("+5 more years): 6.77%"));
        assert!(prompt.contains("+10 more years): 7.34%"));
        assert!(prompt.contains("- 11: HK$1,410,000"));
        assert!(prompt.contains("verdict (Buy/Sell/Hold)"));
        assert!(prompt.contains("under 200 words"));
    }

    #[test]
    fn test_unavailable_rates_render_as_na() {
        let mut facts = sample_facts();
        facts.seller_irr = None;
        facts.buyer_irr_10y = None;

        let prompt = build_prompt(&facts);
        assert!(prompt.contains("Exit IRR: N/A"));
        assert!(prompt.contains("+10 more years): N/A"));
        assert!(!prompt.contains("Exit IRR: 0.00%"));
    }

    #[test]
    fn test_facts_from_simulation() {
        let schedule = PolicySchedule::default_illustration();
        let engine = TradeEngine::new(schedule.clone());
        let result = engine.simulate(&TradeParams::default());

        let facts = DealFacts::from_simulation(&result, &schedule);

        assert_eq!(facts.sale_year, 10);
        assert_eq!(facts.seller_sale_price, result.broker_cost);
        assert_eq!(facts.original_principal, 1_000_000.0);
        assert_eq!(facts.cv_reference.len(), 11);
        assert_eq!(facts.cv_reference[0], (10, 1_300_000.0));
        assert_eq!(facts.cv_reference[10], (20, 2_816_000.0));
        assert_eq!(
            facts.buyer_irr_5y,
            result.projection_for_year(15).and_then(|p| p.irr)
        );
        assert!(facts.buyer_irr_10y.is_some());
    }

    #[test]
    fn test_facts_near_schedule_end() {
        // A year-25 sale leaves no +10 hold in a 30-year table.
        let schedule = PolicySchedule::default_illustration();
        let engine = TradeEngine::new(schedule.clone());
        let result = engine.simulate(&TradeParams::new(25, 5.0, 2.0));

        let facts = DealFacts::from_simulation(&result, &schedule);
        assert!(facts.buyer_irr_5y.is_some());
        assert!(facts.buyer_irr_10y.is_none());
        assert_eq!(facts.cv_reference.len(), 6);
    }
}
