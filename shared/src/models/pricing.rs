//! Pricing Models
//!
//! Field names follow the studio configuration screen (utilidad, comisión,
//! sobreprecio) so the same JSON travels between the UI, the CRUD layer and
//! the calculator untouched.

use serde::{Deserialize, Serialize};

/// Which margin applies to a catalog line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitType {
    /// Uses `utilidad_servicio`
    Service,
    /// Uses `utilidad_producto`
    Product,
}

impl ProfitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Product => "product",
        }
    }
}

/// Per-studio pricing configuration (all values are percentages, 30 = 30%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PricingConfig {
    /// Profit margin applied to services
    pub utilidad_servicio: f64,
    /// Profit margin applied to products
    pub utilidad_producto: f64,
    /// Sales commission backed into the price
    pub comision_venta: f64,
    /// Discount headroom added on top of the safe price
    pub sobreprecio: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            utilidad_servicio: 30.0,
            utilidad_producto: 40.0,
            comision_venta: 10.0,
            sobreprecio: 10.0,
        }
    }
}

/// Computed price for one line. Never persisted on catalog items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Absolute profit amount (cost × margin), rounded to cents
    pub utilidad: f64,
    /// Public price, rounded to cents
    pub precio_publico: f64,
}

/// Rounded intermediate values of a pricing computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub base_profit: f64,
    /// cost + overhead + base_profit
    pub subtotal: f64,
    /// subtotal grossed up for the sales commission
    pub base_price: f64,
    /// base_price with the safety factor applied
    pub safe_price: f64,
    /// safe_price with the discount headroom applied
    pub public_price: f64,
}

impl From<PricingBreakdown> for PricingResult {
    fn from(b: PricingBreakdown) -> Self {
        Self {
            utilidad: b.base_profit,
            precio_publico: b.public_price,
        }
    }
}

/// A stored pricing configuration row
///
/// Saving a new configuration supersedes the previous active row instead of
/// deleting it; only the row with `is_active = true` is read for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StoredPricingConfig {
    pub id: i64,
    pub studio_id: i64,
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub config: PricingConfig,
    pub is_active: bool,
    pub created_at: i64,
    pub superseded_at: Option<i64>,
}

/// Catalog line as stored: raw cost inputs only, price is derived on read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub cost: f64,
    #[serde(default)]
    pub overhead: f64,
    pub profit_type: ProfitType,
}

/// Read view of a catalog item with its price computed against the current config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedCatalogItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub utilidad: f64,
    pub precio_publico: f64,
}
