//! 审计日志类型定义

use serde::{Deserialize, Serialize};
use shared::models::SectionId;

/// 审计操作类型（枚举，非自由文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// 完成一次 setup 校验运行
    SetupValidated,
    /// 单个 section 校验失败（validator 缺失或崩溃）
    SectionFailed,
    /// 定价配置变更（旧配置被替代）
    PricingConfigChanged,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetupValidated => "setup_validated",
            Self::SectionFailed => "section_failed",
            Self::PricingConfigChanged => "pricing_config_changed",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 审计日志条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub studio_id: i64,
    pub action: AuditAction,
    /// 触发来源（如 "setup_aggregator", "pricing_service"）
    pub source: String,
    pub section_id: Option<SectionId>,
    /// 结构化详情（JSON）
    pub details: Option<serde_json::Value>,
    /// 时间戳（Unix 毫秒）
    pub created_at: i64,
}
