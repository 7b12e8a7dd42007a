//! PostgreSQL repository
//!
//! Studio tables are owned by the CRUD layer and only read here. The setup
//! status, section progress, pricing configuration and audit tables are
//! created by `migrations/`.

use async_trait::async_trait;
use serde_json::Value;
use shared::models::{
    PricingConfig, SectionId, SectionStatus, SetupSectionConfig, SetupSectionProgress,
    StoredPricingConfig, StudioSetupStatus,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{PricingConfigRepository, RepoError, RepoResult, SetupRepository};
use crate::audit::AuditEntry;
use crate::setup::catalog;

/// Nested read of one studio as a JSON document (camelCase keys).
/// Absent child collections come back as JSON null.
const SNAPSHOT_QUERY: &str = r#"
SELECT jsonb_build_object(
    'id', s.id,
    'name', s.name,
    'slug', s.slug,
    'logoUrl', s.logo_url,
    'slogan', s.slogan,
    'description', s.description,
    'email', s.email,
    'phone', s.phone,
    'address', s.address,
    'website', s.website,
    'configurations', (
        SELECT jsonb_agg(COALESCE(c.data, '{}'::jsonb)
            || jsonb_build_object('type', c.config_type, 'isActive', c.is_active))
        FROM studio_configurations c WHERE c.studio_id = s.id
    ),
    'socialNetworks', (
        SELECT jsonb_agg(jsonb_build_object(
            'platform', n.platform, 'url', n.url, 'isActive', n.is_active))
        FROM studio_social_networks n WHERE n.studio_id = s.id
    ),
    'commercialTerms', (
        SELECT jsonb_agg(jsonb_build_object(
            'name', t.name, 'isActive', t.is_active,
            'discountPercentage', t.discount_percentage,
            'advancePercentage', t.advance_percentage))
        FROM commercial_terms t WHERE t.studio_id = s.id
    ),
    'services', (
        SELECT jsonb_agg(jsonb_build_object(
            'name', v.name, 'price', v.price, 'isActive', v.is_active))
        FROM services v WHERE v.studio_id = s.id
    ),
    'users', (
        SELECT jsonb_agg(jsonb_build_object('userId', u.user_id, 'role', u.role))
        FROM studio_users u WHERE u.studio_id = s.id
    )
)
FROM studios s
WHERE s.id = $1
"#;

#[derive(sqlx::FromRow)]
struct SectionProgressRow {
    section_id: String,
    status: String,
    completion_percentage: i32,
    completed_fields: Vec<String>,
    missing_fields: Vec<String>,
    errors: Vec<String>,
    completed_at: Option<i64>,
    last_updated_at: i64,
}

impl TryFrom<SectionProgressRow> for SetupSectionProgress {
    type Error = RepoError;

    fn try_from(row: SectionProgressRow) -> Result<Self, Self::Error> {
        let status = SectionStatus::parse(&row.status).ok_or_else(|| {
            RepoError::Serialization(format!("unknown section status '{}'", row.status))
        })?;
        Ok(Self {
            section_id: SectionId::from(row.section_id),
            status,
            completion_percentage: row.completion_percentage,
            completed_fields: row.completed_fields,
            missing_fields: row.missing_fields,
            errors: row.errors,
            completed_at: row.completed_at,
            last_updated_at: row.last_updated_at,
        })
    }
}

/// sqlx-backed implementation of both repository traits
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and apply migrations
    pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }
}

#[async_trait]
impl SetupRepository for PgRepository {
    async fn load_studio_snapshot(&self, studio_id: i64) -> RepoResult<Value> {
        let row: Option<(Value,)> = sqlx::query_as(SNAPSHOT_QUERY)
            .bind(studio_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|(snapshot,)| snapshot)
            .ok_or_else(|| RepoError::NotFound(format!("studio {studio_id}")))
    }

    async fn load_active_section_configs(&self) -> RepoResult<Vec<SetupSectionConfig>> {
        // Static in-process catalog for now
        Ok(catalog::active_sections())
    }

    async fn upsert_setup_status(
        &self,
        studio_id: i64,
        overall_progress: i32,
        is_fully_configured: bool,
        now: i64,
    ) -> RepoResult<StudioSetupStatus> {
        let status = sqlx::query_as::<_, StudioSetupStatus>(
            "INSERT INTO studio_setup_status
                (id, studio_id, overall_progress, is_fully_configured, last_validated_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5, $5)
             ON CONFLICT (studio_id) DO UPDATE SET
                overall_progress = EXCLUDED.overall_progress,
                is_fully_configured = EXCLUDED.is_fully_configured,
                last_validated_at = EXCLUDED.last_validated_at,
                updated_at = EXCLUDED.updated_at
             RETURNING id, studio_id, overall_progress, is_fully_configured,
                last_validated_at, created_at, updated_at",
        )
        .bind(shared::util::snowflake_id())
        .bind(studio_id)
        .bind(overall_progress)
        .bind(is_fully_configured)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(status)
    }

    async fn replace_section_progress(
        &self,
        setup_status_id: i64,
        sections: &[SetupSectionProgress],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM setup_section_progress WHERE setup_status_id = $1")
            .bind(setup_status_id)
            .execute(&mut *tx)
            .await?;

        for (position, section) in sections.iter().enumerate() {
            sqlx::query(
                "INSERT INTO setup_section_progress
                    (setup_status_id, position, section_id, status, completion_percentage,
                     completed_fields, missing_fields, errors, completed_at, last_updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(setup_status_id)
            .bind(position as i32)
            .bind(section.section_id.as_str())
            .bind(section.status.as_str())
            .bind(section.completion_percentage)
            .bind(&section.completed_fields)
            .bind(&section.missing_fields)
            .bind(&section.errors)
            .bind(section.completed_at)
            .bind(section.last_updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_setup_status(&self, studio_id: i64) -> RepoResult<Option<StudioSetupStatus>> {
        let status = sqlx::query_as::<_, StudioSetupStatus>(
            "SELECT id, studio_id, overall_progress, is_fully_configured,
                last_validated_at, created_at, updated_at
             FROM studio_setup_status WHERE studio_id = $1",
        )
        .bind(studio_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut status) = status else {
            return Ok(None);
        };

        let rows: Vec<SectionProgressRow> = sqlx::query_as(
            "SELECT section_id, status, completion_percentage, completed_fields,
                missing_fields, errors, completed_at, last_updated_at
             FROM setup_section_progress
             WHERE setup_status_id = $1
             ORDER BY position",
        )
        .bind(status.id)
        .fetch_all(&self.pool)
        .await?;

        status.sections = rows
            .into_iter()
            .map(SetupSectionProgress::try_from)
            .collect::<RepoResult<Vec<_>>>()?;
        Ok(Some(status))
    }

    async fn append_audit_log(&self, entry: &AuditEntry) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO setup_audit_logs (studio_id, action, source, section_id, details, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(entry.studio_id)
        .bind(entry.action.as_str())
        .bind(&entry.source)
        .bind(entry.section_id.as_ref().map(|s| s.as_str()))
        .bind(entry.details.as_ref())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl PricingConfigRepository for PgRepository {
    async fn find_active_pricing_config(
        &self,
        studio_id: i64,
    ) -> RepoResult<Option<StoredPricingConfig>> {
        let row = sqlx::query_as::<_, StoredPricingConfig>(
            "SELECT id, studio_id, utilidad_servicio, utilidad_producto, comision_venta,
                sobreprecio, is_active, created_at, superseded_at
             FROM pricing_configs
             WHERE studio_id = $1 AND is_active
             LIMIT 1",
        )
        .bind(studio_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save_pricing_config(
        &self,
        studio_id: i64,
        config: PricingConfig,
        now: i64,
    ) -> RepoResult<StoredPricingConfig> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE pricing_configs SET is_active = FALSE, superseded_at = $2
             WHERE studio_id = $1 AND is_active",
        )
        .bind(studio_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let stored = sqlx::query_as::<_, StoredPricingConfig>(
            "INSERT INTO pricing_configs
                (id, studio_id, utilidad_servicio, utilidad_producto, comision_venta,
                 sobreprecio, is_active, created_at, superseded_at)
             VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, NULL)
             RETURNING id, studio_id, utilidad_servicio, utilidad_producto, comision_venta,
                sobreprecio, is_active, created_at, superseded_at",
        )
        .bind(shared::util::snowflake_id())
        .bind(studio_id)
        .bind(config.utilidad_servicio)
        .bind(config.utilidad_producto)
        .bind(config.comision_venta)
        .bind(config.sobreprecio)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(stored)
    }
}
