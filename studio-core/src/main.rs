//! studio-setup: run setup validation for studios against PostgreSQL
//!
//! ```text
//! studio-setup <studio_id> [<studio_id> ...]
//! ```
//!
//! Prints the resulting status of each studio as JSON on stdout.

use std::sync::Arc;

use studio_core::{
    ApiResponse, AppError, AuditService, AuditWorker, Config, PgRepository,
    SetupCompletenessAggregator,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenv::dotenv();

    let config = Config::from_env()?;
    studio_core::init_logger_with_file(
        Some(config.log_level.as_str()),
        config.is_production(),
        config.log_dir.as_deref(),
    );

    let studio_ids = std::env::args()
        .skip(1)
        .map(|arg| {
            arg.parse::<i64>()
                .map_err(|_| format!("invalid studio id '{arg}'"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if studio_ids.is_empty() {
        return Err("usage: studio-setup <studio_id> [<studio_id> ...]".into());
    }

    tracing::info!(
        "Starting studio-setup (env: {}, studios: {})",
        config.environment,
        studio_ids.len()
    );

    let repo = Arc::new(
        PgRepository::connect(&config.database_url, config.database_max_connections).await?,
    );

    // Audit worker exits once every AuditService clone is dropped
    let (audit, worker_handle) = if config.enable_audit_log {
        let (audit, rx) = AuditService::new(config.audit_buffer_size);
        let worker = AuditWorker::new(Arc::clone(&repo));
        (audit, Some(tokio::spawn(worker.run(rx))))
    } else {
        (AuditService::disabled(), None)
    };

    let aggregator = SetupCompletenessAggregator::new(repo, config.setup_policy(), audit);

    let mut failures = 0usize;
    for studio_id in studio_ids {
        let response = match aggregator.run(studio_id).await {
            Ok(status) => serde_json::to_string_pretty(&ApiResponse::success(status))?,
            Err(e) => {
                failures += 1;
                tracing::error!(studio_id, error = %e, "Setup validation failed");
                let err: AppError = e.into();
                serde_json::to_string_pretty(&ApiResponse::<()>::from(err))?
            }
        };
        println!("{response}");
    }

    drop(aggregator);
    if let Some(handle) = worker_handle
        && let Err(e) = handle.await
    {
        tracing::warn!("Audit worker stopped abnormally: {e}");
    }

    if failures > 0 {
        return Err(format!("{failures} studio validation(s) failed").into());
    }
    Ok(())
}
