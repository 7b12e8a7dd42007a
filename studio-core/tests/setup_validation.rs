//! End-to-end setup validation through the in-memory repository

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use shared::models::{
    SectionId, SectionStatus, SetupSectionConfig, SetupSectionProgress, StudioSetupStatus,
};
use studio_core::audit::{AuditAction, AuditEntry};
use studio_core::db::{RepoError, RepoResult};
use studio_core::{
    AuditService, AuditWorker, MemoryRepository, SetupCompletenessAggregator, SetupPolicy,
    SetupRepository, run_setup_validation,
};

const STUDIO: i64 = 42;

fn complete_studio() -> Value {
    json!({
        "name": "Estudio Luz",
        "slug": "estudio-luz",
        "logoUrl": "https://cdn.estudioluz.mx/logo.png",
        "slogan": "Momentos que duran",
        "description": "Fotografía y video de bodas",
        "email": "hola@estudioluz.mx",
        "phone": "+52 55 1234 5678",
        "address": "Av. Reforma 100, CDMX",
        "website": "https://estudioluz.mx",
        "socialNetworks": [
            { "platform": "instagram", "url": "https://instagram.com/estudioluz", "isActive": true },
            { "platform": "facebook", "url": "https://facebook.com/estudioluz", "isActive": true }
        ],
        "configurations": [
            { "type": "pricing", "margenBase": 30, "sobreprecio": 10, "descuentoMaximo": 10 }
        ],
        "commercialTerms": [
            { "name": "Contado", "isActive": true, "discountPercentage": 10, "advancePercentage": 0 }
        ],
        "services": [
            { "name": "Boda completa", "price": 25000, "isActive": true },
            { "name": "Sesión preboda", "price": 4500, "isActive": true },
            { "name": "XV años", "price": 18000, "isActive": true },
            { "name": "Retrato", "price": 1500, "isActive": true },
            { "name": "Video highlights", "price": 9000, "isActive": true }
        ],
        "users": [{ "userId": 1, "role": "owner" }]
    })
}

fn section(section_id: SectionId, weight: u32) -> SetupSectionConfig {
    SetupSectionConfig {
        section_id,
        name: "test".to_string(),
        required_fields: vec![],
        optional_fields: vec![],
        dependencies: vec![],
        weight,
        is_active: true,
    }
}

fn repo_with_snapshot(snapshot: Value) -> Arc<MemoryRepository> {
    let repo = MemoryRepository::new();
    repo.put_snapshot(STUDIO, snapshot);
    Arc::new(repo)
}

#[tokio::test]
async fn complete_studio_is_fully_configured() {
    let repo = repo_with_snapshot(complete_studio());

    let status = run_setup_validation(Arc::clone(&repo), AuditService::disabled(), STUDIO)
        .await
        .unwrap();

    assert_eq!(status.studio_id, STUDIO);
    assert_eq!(status.overall_progress, 100);
    assert!(status.is_fully_configured);
    assert_eq!(status.sections.len(), 6);
    for s in &status.sections {
        assert_eq!(s.status, SectionStatus::Completed, "{}", s.section_id);
        assert!(s.errors.is_empty());
        assert_eq!(s.completed_at, Some(status.last_validated_at));
    }
}

#[tokio::test]
async fn sections_keep_catalog_order() {
    let repo = repo_with_snapshot(complete_studio());
    let status = run_setup_validation(repo, AuditService::disabled(), STUDIO)
        .await
        .unwrap();

    let order: Vec<SectionId> = status.sections.iter().map(|s| s.section_id.clone()).collect();
    assert_eq!(
        order,
        vec![
            SectionId::Identity,
            SectionId::Contact,
            SectionId::Social,
            SectionId::Pricing,
            SectionId::CommercialTerms,
            SectionId::Services,
        ]
    );
}

#[tokio::test]
async fn empty_studio_scores_low_with_partial_sections() {
    let repo = repo_with_snapshot(json!({ "name": "Nuevo Estudio", "slug": "nuevo", "services": [] }));
    let status = run_setup_validation(repo, AuditService::disabled(), STUDIO)
        .await
        .unwrap();

    // identity 100 × 15 out of a total weight of 80
    assert_eq!(status.overall_progress, 19);
    assert!(!status.is_fully_configured);

    let services = status.section(&SectionId::Services).unwrap();
    assert_eq!(services.status, SectionStatus::Pending);
    assert_eq!(services.completion_percentage, 0);
    assert!(services.missing_fields.contains(&"services".to_string()));
}

#[tokio::test]
async fn weighted_two_section_score() {
    let repo = MemoryRepository::with_sections(vec![
        section(SectionId::Identity, 15),
        section(SectionId::Services, 5),
    ]);
    repo.put_snapshot(
        STUDIO,
        json!({ "name": "Estudio Luz", "slug": "estudio-luz", "services": [] }),
    );

    let status = run_setup_validation(Arc::new(repo), AuditService::disabled(), STUDIO)
        .await
        .unwrap();
    assert_eq!(status.overall_progress, 75);
}

#[tokio::test]
async fn error_takes_priority_over_completion() {
    let mut snapshot = complete_studio();
    snapshot["slug"] = json!("Estudio Luz!");
    let repo = repo_with_snapshot(snapshot);

    let status = run_setup_validation(repo, AuditService::disabled(), STUDIO)
        .await
        .unwrap();
    let identity = status.section(&SectionId::Identity).unwrap();
    assert_eq!(identity.completion_percentage, 100);
    assert_eq!(identity.status, SectionStatus::Error);
    assert!(identity.completed_at.is_none());
    // completeness still counts toward the overall score
    assert_eq!(status.overall_progress, 100);
}

#[tokio::test]
async fn rerun_updates_status_and_replaces_sections() {
    let repo = repo_with_snapshot(json!({ "name": "Estudio Luz", "slug": "estudio-luz" }));

    let first = run_setup_validation(Arc::clone(&repo), AuditService::disabled(), STUDIO)
        .await
        .unwrap();
    repo.put_snapshot(STUDIO, complete_studio());
    let second = run_setup_validation(Arc::clone(&repo), AuditService::disabled(), STUDIO)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.overall_progress > first.overall_progress);

    let stored = repo.find_setup_status(STUDIO).await.unwrap().unwrap();
    assert_eq!(stored.overall_progress, second.overall_progress);
    assert_eq!(stored.sections, second.sections);
}

#[tokio::test]
async fn dependencies_are_not_enforced() {
    // Services depends on Pricing, which is empty here
    let mut snapshot = complete_studio();
    snapshot["configurations"] = json!([]);
    let repo = repo_with_snapshot(snapshot);

    let status = run_setup_validation(repo, AuditService::disabled(), STUDIO)
        .await
        .unwrap();
    assert_eq!(
        status.section(&SectionId::Pricing).unwrap().status,
        SectionStatus::Pending
    );
    assert_eq!(
        status.section(&SectionId::Services).unwrap().status,
        SectionStatus::Completed
    );
}

#[tokio::test]
async fn audit_entries_flow_through_worker() {
    let repo = MemoryRepository::with_sections(vec![
        section(SectionId::Identity, 10),
        section(SectionId::Branding, 10),
    ]);
    repo.put_snapshot(STUDIO, complete_studio());
    let repo = Arc::new(repo);

    let (audit, rx) = AuditService::new(16);
    let worker = tokio::spawn(AuditWorker::new(Arc::clone(&repo)).run(rx));

    let aggregator =
        SetupCompletenessAggregator::new(Arc::clone(&repo), SetupPolicy::default(), audit);
    let status = aggregator.run(STUDIO).await.unwrap();
    drop(aggregator);
    worker.await.unwrap();

    let branding = status.section(&SectionId::Branding).unwrap();
    assert_eq!(branding.status, SectionStatus::Error);
    assert_eq!(status.overall_progress, 50);

    let entries = repo.audit_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, AuditAction::SectionFailed);
    assert_eq!(entries[0].section_id, Some(SectionId::Branding));
    assert_eq!(entries[1].action, AuditAction::SetupValidated);
    assert_eq!(entries[1].details.as_ref().unwrap()["overallProgress"], 50);
}

/// Memory repository whose audit table is unavailable
struct BrokenAuditRepo(MemoryRepository);

#[async_trait]
impl SetupRepository for BrokenAuditRepo {
    async fn load_studio_snapshot(&self, studio_id: i64) -> RepoResult<Value> {
        self.0.load_studio_snapshot(studio_id).await
    }

    async fn load_active_section_configs(&self) -> RepoResult<Vec<SetupSectionConfig>> {
        self.0.load_active_section_configs().await
    }

    async fn upsert_setup_status(
        &self,
        studio_id: i64,
        overall_progress: i32,
        is_fully_configured: bool,
        now: i64,
    ) -> RepoResult<StudioSetupStatus> {
        self.0
            .upsert_setup_status(studio_id, overall_progress, is_fully_configured, now)
            .await
    }

    async fn replace_section_progress(
        &self,
        setup_status_id: i64,
        sections: &[SetupSectionProgress],
    ) -> RepoResult<()> {
        self.0.replace_section_progress(setup_status_id, sections).await
    }

    async fn find_setup_status(&self, studio_id: i64) -> RepoResult<Option<StudioSetupStatus>> {
        self.0.find_setup_status(studio_id).await
    }

    async fn append_audit_log(&self, _entry: &AuditEntry) -> RepoResult<()> {
        Err(RepoError::Database("audit table unavailable".to_string()))
    }
}

#[tokio::test]
async fn audit_failure_does_not_fail_validation() {
    let inner = MemoryRepository::new();
    inner.put_snapshot(STUDIO, complete_studio());
    let repo = Arc::new(BrokenAuditRepo(inner));

    let (audit, rx) = AuditService::new(16);
    let worker = tokio::spawn(AuditWorker::new(Arc::clone(&repo)).run(rx));

    let status = run_setup_validation(Arc::clone(&repo), audit, STUDIO)
        .await
        .unwrap();
    worker.await.unwrap();

    assert_eq!(status.overall_progress, 100);
    assert!(repo.find_setup_status(STUDIO).await.unwrap().is_some());
}

#[tokio::test]
async fn full_audit_channel_drops_entries_silently() {
    let repo = repo_with_snapshot(complete_studio());
    // Nobody drains the receiver: the second entry onwards is dropped
    let (audit, _rx) = AuditService::new(1);

    for _ in 0..3 {
        let status = run_setup_validation(Arc::clone(&repo), audit.clone(), STUDIO)
            .await
            .unwrap();
        assert!(status.is_fully_configured);
    }
}

#[tokio::test]
async fn missing_studio_is_an_error() {
    let repo = Arc::new(MemoryRepository::new());
    let err = run_setup_validation(repo, AuditService::disabled(), 7)
        .await
        .unwrap_err();
    let app: studio_core::AppError = err.into();
    assert_eq!(app.code, studio_core::ErrorCode::StudioNotFound);
}
