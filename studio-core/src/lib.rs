//! Studio Core - 定价计算引擎与工作室配置完整度评分
//!
//! # 架构概述
//!
//! - **定价** (`pricing`): 纯函数定价计算、目录价格视图、报价冻结
//! - **配置评分** (`setup`): section validators + 加权汇总
//! - **数据库** (`db`): 仓储 trait，内存与 PostgreSQL 实现
//! - **审计** (`audit`): best-effort 审计日志（mpsc + worker）
//!
//! # 模块结构
//!
//! ```text
//! studio-core/src/
//! ├── core/          # 配置
//! ├── pricing/       # 定价计算、报价
//! ├── setup/         # validators、aggregator
//! ├── db/            # 仓储层
//! ├── audit/         # 审计日志
//! └── utils/         # 日志
//! ```

pub mod audit;
pub mod core;
pub mod db;
pub mod pricing;
pub mod setup;
pub mod utils;

// Re-export 公共类型
pub use audit::{AuditService, AuditWorker};
pub use crate::core::Config;
pub use db::{MemoryRepository, PgRepository, PricingConfigRepository, SetupRepository};
pub use pricing::{PricingCalculator, PricingError, PricingPolicy, PricingService, compute_pricing};
pub use setup::{SetupCompletenessAggregator, SetupError, SetupPolicy, run_setup_validation};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
