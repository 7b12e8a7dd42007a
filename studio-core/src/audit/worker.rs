//! 审计日志后台 Worker
//!
//! 从 mpsc 通道消费 AuditEntry，写入仓储。
//! 通道关闭（所有 AuditService 被 drop）时自动退出。

use std::sync::Arc;

use tokio::sync::mpsc;

use super::types::AuditEntry;
use crate::db::SetupRepository;

/// 审计日志后台 Worker
pub struct AuditWorker<R: SetupRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: SetupRepository + ?Sized> AuditWorker<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// 运行 worker（直到通道关闭）
    pub async fn run(self, mut rx: mpsc::Receiver<AuditEntry>) {
        tracing::debug!("Audit log worker started");

        while let Some(entry) = rx.recv().await {
            match self.repo.append_audit_log(&entry).await {
                Ok(()) => {
                    tracing::debug!(
                        studio_id = entry.studio_id,
                        action = %entry.action,
                        "Audit entry recorded"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        studio_id = entry.studio_id,
                        action = %entry.action,
                        error = %e,
                        "Failed to write audit entry"
                    );
                }
            }
        }

        tracing::debug!("Audit log channel closed, worker stopping");
    }
}
