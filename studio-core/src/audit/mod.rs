//! 审计日志模块（尽力而为, best-effort）
//!
//! # 架构
//!
//! ```text
//! 配置变更 / 校验运行
//!   └─ AuditService::log() → mpsc (try_send) → AuditWorker → SetupRepository::append_audit_log
//! ```
//!
//! 审计写入失败只记录 warn 日志，永远不会让主操作失败。
//! 通道满时直接丢弃该条记录。

pub mod service;
pub mod types;
pub mod worker;

pub use service::AuditService;
pub use types::{AuditAction, AuditEntry};
pub use worker::AuditWorker;
