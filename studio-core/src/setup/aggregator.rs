//! Setup completeness aggregator
//!
//! 加载快照 → 并发执行所有 active section 的 validator → 推导状态 →
//! 计算加权总进度 → upsert 状态行并整体替换 section 行。
//!
//! 单个 section 失败（未实现 / panic）只会变成一个 `error` section，
//! 不会中断整个 run；仓储失败则直接返回错误。

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use serde_json::{Value, json};
use shared::models::{
    SectionId, SectionStatus, SetupSectionConfig, SetupSectionProgress, StudioSetupStatus,
    ValidationResult,
};
use tokio::task::JoinSet;

use super::SetupError;
use super::status::{derive_status, overall_progress};
use super::validators::{SectionValidator, ValidatorKind};
use crate::audit::{AuditAction, AuditService};
use crate::db::SetupRepository;

const AUDIT_SOURCE: &str = "setup_aggregator";

/// 默认 "fully configured" 阈值
pub const DEFAULT_FULLY_CONFIGURED_THRESHOLD: i32 = 90;

/// Tunables of a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupPolicy {
    /// `overall_progress >= threshold` marks the studio fully configured
    pub fully_configured_threshold: i32,
}

impl Default for SetupPolicy {
    fn default() -> Self {
        Self {
            fully_configured_threshold: DEFAULT_FULLY_CONFIGURED_THRESHOLD,
        }
    }
}

type SectionOutcome = Result<ValidationResult, SetupError>;

/// Runs every active section validator against one studio and persists the
/// aggregated status.
pub struct SetupCompletenessAggregator<R: SetupRepository + ?Sized> {
    repo: Arc<R>,
    policy: SetupPolicy,
    audit: AuditService,
}

impl<R: SetupRepository + ?Sized> SetupCompletenessAggregator<R> {
    pub fn new(repo: Arc<R>, policy: SetupPolicy, audit: AuditService) -> Self {
        Self {
            repo,
            policy,
            audit,
        }
    }

    pub fn policy(&self) -> SetupPolicy {
        self.policy
    }

    /// Validate one studio. Idempotent; safe to call repeatedly.
    ///
    /// Returns the freshly computed sections, not a re-read from storage.
    pub async fn run(&self, studio_id: i64) -> Result<StudioSetupStatus, SetupError> {
        self.run_with(studio_id, ValidatorKind::for_section).await
    }

    async fn run_with<V, F>(
        &self,
        studio_id: i64,
        resolve: F,
    ) -> Result<StudioSetupStatus, SetupError>
    where
        V: SectionValidator + Send + 'static,
        F: Fn(&SectionId) -> V,
    {
        let snapshot = Arc::new(self.repo.load_studio_snapshot(studio_id).await?);
        let configs = self.repo.load_active_section_configs().await?;

        tracing::debug!(studio_id, sections = configs.len(), "Running setup validation");

        let outcomes = evaluate_sections(snapshot, &configs, resolve).await;

        let now = shared::util::now_millis();
        let mut sections = Vec::with_capacity(configs.len());
        let mut weighted = Vec::with_capacity(configs.len());
        for (config, outcome) in configs.iter().zip(outcomes) {
            let progress = match outcome {
                Ok(result) => section_progress(config, result, now),
                Err(e) => {
                    tracing::warn!(
                        studio_id,
                        section_id = %config.section_id,
                        error = %e,
                        "Section validation failed"
                    );
                    self.audit.log(
                        studio_id,
                        AuditAction::SectionFailed,
                        AUDIT_SOURCE,
                        Some(config.section_id.clone()),
                        Some(json!({ "error": e.to_string() })),
                    );
                    failed_section_progress(config, &e, now)
                }
            };
            weighted.push((config.weight, progress.completion_percentage));
            sections.push(progress);
        }

        let overall = overall_progress(&weighted);
        let fully_configured = overall >= self.policy.fully_configured_threshold;

        let mut status = self
            .repo
            .upsert_setup_status(studio_id, overall, fully_configured, now)
            .await?;
        self.repo
            .replace_section_progress(status.id, &sections)
            .await?;

        tracing::info!(
            studio_id,
            overall_progress = overall,
            is_fully_configured = fully_configured,
            "Setup validation completed"
        );
        self.audit.log(
            studio_id,
            AuditAction::SetupValidated,
            AUDIT_SOURCE,
            None,
            Some(json!({
                "overallProgress": overall,
                "isFullyConfigured": fully_configured,
                "sections": sections
                    .iter()
                    .map(|s| json!({ "sectionId": s.section_id, "status": s.status }))
                    .collect::<Vec<_>>(),
            })),
        );

        status.sections = sections;
        Ok(status)
    }
}

/// Convenience entry point with the default policy
pub async fn run_setup_validation<R: SetupRepository + ?Sized>(
    repo: Arc<R>,
    audit: AuditService,
    studio_id: i64,
) -> Result<StudioSetupStatus, SetupError> {
    SetupCompletenessAggregator::new(repo, SetupPolicy::default(), audit)
        .run(studio_id)
        .await
}

/// Fan out one blocking task per section, fan in by catalog index
async fn evaluate_sections<V, F>(
    snapshot: Arc<Value>,
    configs: &[SetupSectionConfig],
    resolve: F,
) -> Vec<SectionOutcome>
where
    V: SectionValidator + Send + 'static,
    F: Fn(&SectionId) -> V,
{
    let mut tasks = JoinSet::new();
    for (index, config) in configs.iter().enumerate() {
        let validator = resolve(&config.section_id);
        let snapshot = Arc::clone(&snapshot);
        tasks.spawn_blocking(move || {
            let section = validator.section_id();
            let outcome = catch_unwind(AssertUnwindSafe(|| validator.validate(&snapshot)))
                .unwrap_or_else(|payload| {
                    Err(SetupError::ValidatorPanicked {
                        section,
                        message: panic_message(payload),
                    })
                });
            (index, outcome)
        });
    }

    let mut slots: Vec<Option<SectionOutcome>> = configs.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => slots[index] = Some(outcome),
            Err(e) => tracing::error!(error = %e, "Validation task did not complete"),
        }
    }
    fill_missing(slots, configs)
}

/// Slots left empty by a task that never reported back become failures
fn fill_missing(
    slots: Vec<Option<SectionOutcome>>,
    configs: &[SetupSectionConfig],
) -> Vec<SectionOutcome> {
    slots
        .into_iter()
        .zip(configs)
        .map(|(slot, config)| {
            slot.unwrap_or_else(|| {
                Err(SetupError::ValidatorPanicked {
                    section: config.section_id.clone(),
                    message: "validation task did not complete".to_string(),
                })
            })
        })
        .collect()
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn section_progress(
    config: &SetupSectionConfig,
    result: ValidationResult,
    now: i64,
) -> SetupSectionProgress {
    let status = derive_status(&result);
    SetupSectionProgress {
        section_id: config.section_id.clone(),
        status,
        completion_percentage: i32::from(result.completion_percentage.min(100)),
        completed_fields: result.completed_fields,
        missing_fields: result.missing_fields,
        errors: result.errors,
        completed_at: (status == SectionStatus::Completed).then_some(now),
        last_updated_at: now,
    }
}

/// Synthetic `error` section carrying the failure message
fn failed_section_progress(
    config: &SetupSectionConfig,
    err: &SetupError,
    now: i64,
) -> SetupSectionProgress {
    SetupSectionProgress {
        section_id: config.section_id.clone(),
        status: SectionStatus::Error,
        completion_percentage: 0,
        completed_fields: vec![],
        missing_fields: vec![],
        errors: vec![err.to_string()],
        completed_at: None,
        last_updated_at: now,
    }
}
