//! Quote materialization
//!
//! The one place where computed prices become stored data. A quote captures
//! unit prices, totals, the configuration and the safety factor at creation
//! time so later configuration changes never move an issued quote.

use rust_decimal::Decimal;
use shared::models::{FrozenQuote, FrozenQuoteLine, PricingConfig, QuoteLineInput};

use super::calculator::{checked, to_decimal, to_f64};
use super::{PricingCalculator, PricingError};

impl PricingCalculator {
    /// Freeze a quote for `studio_id` from the given lines and configuration
    pub fn materialize_quote(
        &self,
        studio_id: i64,
        lines: &[QuoteLineInput],
        config: &PricingConfig,
    ) -> Result<FrozenQuote, PricingError> {
        let mut frozen_lines = Vec::with_capacity(lines.len());
        let mut total = Decimal::ZERO;
        let mut total_profit = Decimal::ZERO;

        for line in lines {
            let unit = self.compute(line.cost, line.overhead, line.profit_type, config)?;
            let quantity = Decimal::from(line.quantity);

            let line_total = checked(
                "line_total",
                to_decimal(unit.precio_publico).checked_mul(quantity),
            )?;
            let line_profit = checked(
                "line_profit",
                to_decimal(unit.utilidad).checked_mul(quantity),
            )?;
            total = checked("total", total.checked_add(line_total))?;
            total_profit = checked("total_profit", total_profit.checked_add(line_profit))?;

            frozen_lines.push(FrozenQuoteLine {
                description: line.description.clone(),
                profit_type: line.profit_type,
                quantity: line.quantity,
                unit_cost: line.cost,
                unit_overhead: line.overhead,
                unit_profit: unit.utilidad,
                unit_price: unit.precio_publico,
                line_total: to_f64(line_total),
            });
        }

        tracing::debug!(
            studio_id,
            lines = frozen_lines.len(),
            total = %total,
            "Quote materialized"
        );

        Ok(FrozenQuote {
            id: shared::util::snowflake_id(),
            studio_id,
            lines: frozen_lines,
            total_profit: to_f64(total_profit),
            total: to_f64(total),
            config: *config,
            safety_factor_percent: self.policy().safety_factor_percent,
            computed_at: shared::util::now_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ProfitType;

    use crate::pricing::MAX_AMOUNT;

    fn line(description: &str, cost: f64, quantity: u32) -> QuoteLineInput {
        QuoteLineInput {
            description: description.to_string(),
            cost,
            overhead: 0.0,
            profit_type: ProfitType::Service,
            quantity,
        }
    }

    #[test]
    fn test_materialize_totals() {
        let calc = PricingCalculator::default();
        let quote = calc
            .materialize_quote(
                9,
                &[line("Boda completa", 1000.0, 1), line("Álbum", 100.0, 2)],
                &PricingConfig::default(),
            )
            .unwrap();

        assert_eq!(quote.studio_id, 9);
        assert_eq!(quote.lines.len(), 2);
        assert_eq!(quote.lines[0].unit_price, 1660.39);
        assert_eq!(quote.lines[1].unit_price, 166.04);
        assert_eq!(quote.lines[1].line_total, 332.08);
        assert_eq!(quote.total, 1992.47);
        assert_eq!(quote.total_profit, 360.0);
        assert_eq!(quote.safety_factor_percent, 4.5);
        assert_eq!(quote.config, PricingConfig::default());
    }

    #[test]
    fn test_frozen_quote_ignores_later_config_changes() {
        let calc = PricingCalculator::default();
        let mut config = PricingConfig::default();
        let quote = calc
            .materialize_quote(1, &[line("Sesión", 1000.0, 1)], &config)
            .unwrap();

        config.sobreprecio = 30.0;
        let repriced = calc.compute(1000.0, 0.0, ProfitType::Service, &config).unwrap();

        assert_ne!(repriced.precio_publico, quote.lines[0].unit_price);
        assert_eq!(quote.lines[0].unit_price, 1660.39);
        assert_eq!(quote.config.sobreprecio, 10.0);
    }

    #[test]
    fn test_empty_quote() {
        let quote = PricingCalculator::default()
            .materialize_quote(1, &[], &PricingConfig::default())
            .unwrap();
        assert!(quote.lines.is_empty());
        assert_eq!(quote.total, 0.0);
    }

    #[test]
    fn test_invalid_line_rejects_whole_quote() {
        let err = PricingCalculator::default()
            .materialize_quote(1, &[line("ok", 10.0, 1), line("bad", f64::NAN, 1)], &PricingConfig::default())
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { field: "cost", .. }));
    }

    #[test]
    fn test_oversized_line_total_is_an_error() {
        let config = PricingConfig {
            utilidad_servicio: 99.0,
            utilidad_producto: 99.0,
            comision_venta: 99.9999999999,
            sobreprecio: 99.0,
        };
        let err = PricingCalculator::default()
            .materialize_quote(1, &[line("Producción", MAX_AMOUNT, u32::MAX)], &config)
            .unwrap_err();
        assert_eq!(err, PricingError::Overflow { step: "line_total" });
    }
}
