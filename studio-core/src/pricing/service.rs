//! Pricing service
//!
//! Binds the calculator to a studio's active configuration. The CRUD layer
//! calls this instead of loading configurations itself.

use std::sync::Arc;

use serde_json::json;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    CatalogItem, FrozenQuote, PricedCatalogItem, PricingConfig, QuoteLineInput,
    StoredPricingConfig,
};

use super::{PricingCalculator, PricingPolicy, validate_config};
use crate::audit::{AuditAction, AuditService};
use crate::db::PricingConfigRepository;

const AUDIT_SOURCE: &str = "pricing_service";

pub struct PricingService<R: PricingConfigRepository + ?Sized> {
    repo: Arc<R>,
    calculator: PricingCalculator,
    audit: AuditService,
}

impl<R: PricingConfigRepository + ?Sized> PricingService<R> {
    pub fn new(repo: Arc<R>, policy: PricingPolicy, audit: AuditService) -> Self {
        Self {
            repo,
            calculator: PricingCalculator::new(policy),
            audit,
        }
    }

    pub fn calculator(&self) -> &PricingCalculator {
        &self.calculator
    }

    /// Current active configuration, `PricingConfigMissing` if none was saved
    pub async fn active_config(&self, studio_id: i64) -> AppResult<StoredPricingConfig> {
        self.repo
            .find_active_pricing_config(studio_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::PricingConfigMissing).with_detail("studio_id", studio_id)
            })
    }

    /// Validate and store a new active configuration
    ///
    /// The previous configuration is superseded, not deleted.
    pub async fn update_config(
        &self,
        studio_id: i64,
        config: PricingConfig,
    ) -> AppResult<StoredPricingConfig> {
        validate_config(&config)?;

        let previous = self.repo.find_active_pricing_config(studio_id).await?;
        let stored = self
            .repo
            .save_pricing_config(studio_id, config, shared::util::now_millis())
            .await?;

        tracing::info!(
            studio_id,
            config_id = stored.id,
            "Pricing configuration updated"
        );
        self.audit.log(
            studio_id,
            AuditAction::PricingConfigChanged,
            AUDIT_SOURCE,
            None,
            Some(json!({
                "configId": stored.id,
                "previous": previous.map(|p| p.config),
                "current": stored.config,
            })),
        );

        Ok(stored)
    }

    /// Price one catalog item with the studio's active configuration
    pub async fn price_item(
        &self,
        studio_id: i64,
        item: &CatalogItem,
    ) -> AppResult<PricedCatalogItem> {
        let active = self.active_config(studio_id).await?;
        Ok(self.calculator.price_item(item, &active.config)?)
    }

    pub async fn price_catalog(
        &self,
        studio_id: i64,
        items: &[CatalogItem],
    ) -> AppResult<Vec<PricedCatalogItem>> {
        let active = self.active_config(studio_id).await?;
        Ok(self.calculator.price_catalog(items, &active.config)?)
    }

    /// Freeze a quote against the configuration active right now
    pub async fn quote(&self, studio_id: i64, lines: &[QuoteLineInput]) -> AppResult<FrozenQuote> {
        let active = self.active_config(studio_id).await?;
        Ok(self
            .calculator
            .materialize_quote(studio_id, lines, &active.config)?)
    }
}
