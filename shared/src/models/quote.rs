//! Quote Model
//!
//! Quotes freeze computed prices at creation time. A frozen quote keeps the
//! pricing inputs it was built from and is never recomputed afterwards.

use super::pricing::{PricingConfig, ProfitType};
use serde::{Deserialize, Serialize};

/// Line requested for a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLineInput {
    pub description: String,
    pub cost: f64,
    #[serde(default)]
    pub overhead: f64,
    pub profit_type: ProfitType,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Line of a frozen quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrozenQuoteLine {
    pub description: String,
    pub profit_type: ProfitType,
    pub quantity: u32,
    pub unit_cost: f64,
    pub unit_overhead: f64,
    pub unit_profit: f64,
    pub unit_price: f64,
    /// unit_price × quantity
    pub line_total: f64,
}

/// Materialized quote: prices, totals and the exact inputs used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrozenQuote {
    pub id: i64,
    pub studio_id: i64,
    pub lines: Vec<FrozenQuoteLine>,
    pub total_profit: f64,
    pub total: f64,
    /// Pricing configuration in force when the quote was created
    pub config: PricingConfig,
    /// Safety factor (percent) in force when the quote was created
    pub safety_factor_percent: f64,
    pub computed_at: i64,
}
