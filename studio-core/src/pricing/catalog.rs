//! Catalog price views
//!
//! Catalog rows store cost inputs only; these helpers layer the computed
//! price over them at read time.

use shared::models::{CatalogItem, PricedCatalogItem, PricingConfig};

use super::{PricingCalculator, PricingError};

impl PricingCalculator {
    /// Price one catalog item against the given (current) configuration
    pub fn price_item(
        &self,
        item: &CatalogItem,
        config: &PricingConfig,
    ) -> Result<PricedCatalogItem, PricingError> {
        let result = self.compute(item.cost, item.overhead, item.profit_type, config)?;
        Ok(PricedCatalogItem {
            item: item.clone(),
            utilidad: result.utilidad,
            precio_publico: result.precio_publico,
        })
    }

    /// Price a whole catalog; fails on the first item with invalid inputs
    pub fn price_catalog(
        &self,
        items: &[CatalogItem],
        config: &PricingConfig,
    ) -> Result<Vec<PricedCatalogItem>, PricingError> {
        items
            .iter()
            .map(|item| self.price_item(item, config))
            .collect()
    }
}
