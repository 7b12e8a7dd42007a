//! 核心模块 - 运行配置
//!
//! - [`Config`] - 从环境变量加载的配置

pub mod config;

pub use config::{Config, ConfigError};
