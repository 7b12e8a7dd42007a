//! 审计日志服务
//!
//! `AuditService` 只负责把条目投递到 mpsc 通道；写入由 [`AuditWorker`](super::AuditWorker) 完成。

use tokio::sync::mpsc::{self, error::TrySendError};

use super::types::{AuditAction, AuditEntry};
use shared::models::SectionId;

/// 审计日志服务（可廉价 clone，内部只有一个 Sender）
#[derive(Debug, Clone)]
pub struct AuditService {
    tx: Option<mpsc::Sender<AuditEntry>>,
}

impl AuditService {
    /// 创建审计服务和对应的接收端
    pub fn new(buffer_size: usize) -> (Self, mpsc::Receiver<AuditEntry>) {
        let (tx, rx) = mpsc::channel(buffer_size.max(1));
        (Self { tx: Some(tx) }, rx)
    }

    /// 关闭审计：所有 log 调用直接丢弃
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// 投递一条审计日志（不等待、不失败）
    pub fn log(
        &self,
        studio_id: i64,
        action: AuditAction,
        source: &str,
        section_id: Option<SectionId>,
        details: Option<serde_json::Value>,
    ) {
        let Some(tx) = &self.tx else {
            return;
        };

        let entry = AuditEntry {
            studio_id,
            action,
            source: source.to_string(),
            section_id,
            details,
            created_at: shared::util::now_millis(),
        };

        match tx.try_send(entry) {
            Ok(()) => {}
            Err(TrySendError::Full(entry)) => {
                tracing::warn!(
                    studio_id = entry.studio_id,
                    action = %entry.action,
                    "Audit channel full, entry dropped"
                );
            }
            Err(TrySendError::Closed(entry)) => {
                tracing::warn!(
                    studio_id = entry.studio_id,
                    action = %entry.action,
                    "Audit channel closed, entry dropped"
                );
            }
        }
    }
}
