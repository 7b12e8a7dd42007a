//! Price Calculator
//!
//! Public price and profit from raw cost, overhead and the studio pricing
//! configuration. Uses rust_decimal for the arithmetic, f64 at the edges.
//!
//! ```text
//! base_profit = cost × margin
//! subtotal    = cost + overhead + base_profit
//! base_price  = subtotal / (1 − commission)      commission survives deduction
//! safe_price  = base_price × (1 + safety)        default safety 4.5%
//! public      = safe_price × (1 + sobreprecio)   discount headroom
//! ```
//!
//! Only `base_profit` and `public` are rounded (2 dp, half-up); every
//! intermediate keeps full precision.

use rust_decimal::prelude::*;
use shared::models::{PricingBreakdown, PricingConfig, PricingResult, ProfitType};

use super::PricingError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Default safety factor in percent.
///
/// Compensates margin erosion when the maximum discount is applied together
/// with the sales commission. Tied to the default commission and headroom
/// values; revisit if those defaults change.
pub const DEFAULT_SAFETY_FACTOR_PERCENT: f64 = 4.5;

/// Maximum accepted cost or overhead per unit
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub(super) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub(super) fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Tunable constants of the pricing formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingPolicy {
    /// Safety factor in percent (4.5 = 4.5%)
    pub safety_factor_percent: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            safety_factor_percent: DEFAULT_SAFETY_FACTOR_PERCENT,
        }
    }
}

/// Check the configuration invariant: every percentage finite and in [0, 100)
///
/// A commission of 100% or more has no finite gross-up and is reported as
/// [`PricingError::CommissionTooHigh`].
pub fn validate_config(config: &PricingConfig) -> Result<(), PricingError> {
    if config.comision_venta.is_finite() && config.comision_venta >= 100.0 {
        return Err(PricingError::CommissionTooHigh(config.comision_venta));
    }

    let fields = [
        ("utilidad_servicio", config.utilidad_servicio),
        ("utilidad_producto", config.utilidad_producto),
        ("comision_venta", config.comision_venta),
        ("sobreprecio", config.sobreprecio),
    ];
    for (field, value) in fields {
        if !value.is_finite() || !(0.0..100.0).contains(&value) {
            return Err(PricingError::PercentageOutOfRange { field, value });
        }
    }
    Ok(())
}

fn check_amount(field: &'static str, value: f64) -> Result<Decimal, PricingError> {
    if !value.is_finite() || !(0.0..=MAX_AMOUNT).contains(&value) {
        return Err(PricingError::InvalidInput { field, value });
    }
    Decimal::from_f64(value).ok_or(PricingError::InvalidInput { field, value })
}

fn check_safety(value: f64) -> Result<Decimal, PricingError> {
    let out_of_range = PricingError::PercentageOutOfRange {
        field: "safety_factor_percent",
        value,
    };
    if !value.is_finite() || value < 0.0 {
        return Err(out_of_range);
    }
    Decimal::from_f64(value).ok_or(out_of_range)
}

/// Checked arithmetic; `None` becomes [`PricingError::Overflow`]
#[inline]
pub(super) fn checked(
    step: &'static str,
    value: Option<Decimal>,
) -> Result<Decimal, PricingError> {
    value.ok_or(PricingError::Overflow { step })
}

/// Pure pricing calculator
///
/// Holds only the policy; results depend on the policy plus the four call
/// inputs, so callers caching prices must key on all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PricingCalculator {
    policy: PricingPolicy,
}

impl PricingCalculator {
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Compute profit and public price for one unit
    pub fn compute(
        &self,
        cost: f64,
        overhead: f64,
        profit_type: ProfitType,
        config: &PricingConfig,
    ) -> Result<PricingResult, PricingError> {
        self.breakdown(cost, overhead, profit_type, config)
            .map(PricingResult::from)
    }

    /// Compute every step of the formula (each value rounded for display)
    pub fn breakdown(
        &self,
        cost: f64,
        overhead: f64,
        profit_type: ProfitType,
        config: &PricingConfig,
    ) -> Result<PricingBreakdown, PricingError> {
        validate_config(config)?;
        let cost = check_amount("cost", cost)?;
        let overhead = check_amount("overhead", overhead)?;

        let safety = check_safety(self.policy.safety_factor_percent)?;
        let hundred = Decimal::ONE_HUNDRED;

        // Step 1-2: margin on raw cost
        let margin = match profit_type {
            ProfitType::Service => to_decimal(config.utilidad_servicio),
            ProfitType::Product => to_decimal(config.utilidad_producto),
        } / hundred;
        let base_profit = checked("base_profit", cost.checked_mul(margin))?;

        // Step 3
        let subtotal = checked(
            "subtotal",
            cost.checked_add(overhead)
                .and_then(|v| v.checked_add(base_profit)),
        )?;

        // Step 4: gross up so the commission leaves the subtotal intact
        let commission = to_decimal(config.comision_venta) / hundred;
        let base_price = checked(
            "base_price",
            subtotal.checked_div(Decimal::ONE - commission),
        )?;

        // Step 5
        let safe_price = checked(
            "safe_price",
            (safety / hundred)
                .checked_add(Decimal::ONE)
                .and_then(|factor| base_price.checked_mul(factor)),
        )?;

        // Step 6: discount headroom
        let headroom = Decimal::ONE + to_decimal(config.sobreprecio) / hundred;
        let public_price = checked("public_price", safe_price.checked_mul(headroom))?;

        Ok(PricingBreakdown {
            base_profit: to_f64(base_profit),
            subtotal: to_f64(subtotal),
            base_price: to_f64(base_price),
            safe_price: to_f64(safe_price),
            public_price: to_f64(public_price),
        })
    }
}

/// Compute pricing with the default policy
pub fn compute_pricing(
    cost: f64,
    overhead: f64,
    profit_type: ProfitType,
    config: &PricingConfig,
) -> Result<PricingResult, PricingError> {
    PricingCalculator::default().compute(cost, overhead, profit_type, config)
}
