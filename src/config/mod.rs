// ==========================================
// 熔炉运营控制台 - 配置层
// ==========================================
// 职责: 系统配置管理, 缺省值 + config_kv 覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod config_reader;
pub mod console_config;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigManager};
pub use config_reader::ConsoleConfigReader;
pub use console_config::{ConsoleConfig, MetricsConfig};
