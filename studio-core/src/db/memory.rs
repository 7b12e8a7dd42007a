//! In-memory repository
//!
//! Backs both repository traits with concurrent maps. Each write replaces a
//! whole map entry, so readers never see a half-replaced section list.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;
use shared::models::{
    PricingConfig, SetupSectionConfig, SetupSectionProgress, StoredPricingConfig,
    StudioSetupStatus,
};

use super::{PricingConfigRepository, RepoError, RepoResult, SetupRepository};
use crate::audit::AuditEntry;
use crate::setup::catalog;

pub struct MemoryRepository {
    snapshots: DashMap<i64, Value>,
    sections: Vec<SetupSectionConfig>,
    /// studio_id → status row (sections kept in `section_rows`)
    statuses: DashMap<i64, StudioSetupStatus>,
    /// setup_status_id → section rows
    section_rows: DashMap<i64, Vec<SetupSectionProgress>>,
    pricing_configs: DashMap<i64, Vec<StoredPricingConfig>>,
    audit_log: Mutex<Vec<AuditEntry>>,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::with_sections(catalog::default_sections())
    }
}

impl MemoryRepository {
    /// Repository seeded with the built-in section catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository with a custom section catalog
    pub fn with_sections(sections: Vec<SetupSectionConfig>) -> Self {
        Self {
            snapshots: DashMap::new(),
            sections,
            statuses: DashMap::new(),
            section_rows: DashMap::new(),
            pricing_configs: DashMap::new(),
            audit_log: Mutex::new(Vec::new()),
        }
    }

    /// Insert or replace the snapshot of a studio
    pub fn put_snapshot(&self, studio_id: i64, snapshot: Value) {
        self.snapshots.insert(studio_id, snapshot);
    }

    /// Copy of every audit entry written so far
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit_log.lock().clone()
    }

    /// Full pricing history of a studio, oldest first
    pub fn pricing_history(&self, studio_id: i64) -> Vec<StoredPricingConfig> {
        self.pricing_configs
            .get(&studio_id)
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SetupRepository for MemoryRepository {
    async fn load_studio_snapshot(&self, studio_id: i64) -> RepoResult<Value> {
        self.snapshots
            .get(&studio_id)
            .map(|s| s.value().clone())
            .ok_or_else(|| RepoError::NotFound(format!("studio {studio_id}")))
    }

    async fn load_active_section_configs(&self) -> RepoResult<Vec<SetupSectionConfig>> {
        Ok(self
            .sections
            .iter()
            .filter(|s| s.is_active)
            .cloned()
            .collect())
    }

    async fn upsert_setup_status(
        &self,
        studio_id: i64,
        overall_progress: i32,
        is_fully_configured: bool,
        now: i64,
    ) -> RepoResult<StudioSetupStatus> {
        let mut entry = self
            .statuses
            .entry(studio_id)
            .or_insert_with(|| StudioSetupStatus {
                id: shared::util::snowflake_id(),
                studio_id,
                created_at: now,
                ..Default::default()
            });

        let status = entry.value_mut();
        status.overall_progress = overall_progress;
        status.is_fully_configured = is_fully_configured;
        status.last_validated_at = now;
        status.updated_at = now;

        Ok(status.clone())
    }

    async fn replace_section_progress(
        &self,
        setup_status_id: i64,
        sections: &[SetupSectionProgress],
    ) -> RepoResult<()> {
        self.section_rows.insert(setup_status_id, sections.to_vec());
        Ok(())
    }

    async fn find_setup_status(&self, studio_id: i64) -> RepoResult<Option<StudioSetupStatus>> {
        let Some(status) = self.statuses.get(&studio_id).map(|s| s.value().clone()) else {
            return Ok(None);
        };
        let sections = self
            .section_rows
            .get(&status.id)
            .map(|rows| rows.clone())
            .unwrap_or_default();
        Ok(Some(StudioSetupStatus { sections, ..status }))
    }

    async fn append_audit_log(&self, entry: &AuditEntry) -> RepoResult<()> {
        self.audit_log.lock().push(entry.clone());
        Ok(())
    }
}

#[async_trait]
impl PricingConfigRepository for MemoryRepository {
    async fn find_active_pricing_config(
        &self,
        studio_id: i64,
    ) -> RepoResult<Option<StoredPricingConfig>> {
        Ok(self
            .pricing_configs
            .get(&studio_id)
            .and_then(|rows| rows.iter().rev().find(|r| r.is_active).cloned()))
    }

    async fn save_pricing_config(
        &self,
        studio_id: i64,
        config: PricingConfig,
        now: i64,
    ) -> RepoResult<StoredPricingConfig> {
        let mut rows = self.pricing_configs.entry(studio_id).or_default();
        for row in rows.iter_mut().filter(|r| r.is_active) {
            row.is_active = false;
            row.superseded_at = Some(now);
        }

        let stored = StoredPricingConfig {
            id: shared::util::snowflake_id(),
            studio_id,
            config,
            is_active: true,
            created_at: now,
            superseded_at: None,
        };
        rows.push(stored.clone());
        Ok(stored)
    }
}
