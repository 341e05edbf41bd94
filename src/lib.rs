// ==========================================
// 熔炉运营控制台 - 核心库
// ==========================================
// 组成: 指标引擎 (派生指标 + 自动告警) / 班次台账
// 技术栈: Rust + SQLite + tokio
// 并发模型: 单写者, 无锁
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 指标与台账
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AlertKind, DeviationBand, FurnaceStatus, Severity, ShiftCode, ShiftStatus, TemperatureBand,
};

// 领域实体
pub use domain::{
    Furnace, FurnaceAlert, FurnacePatch, FurnaceRaw, NewFurnace, NewShift, OperatorStats,
    ShiftClosing, ShiftReading, ShiftRecord, ShiftStats,
};

// 引擎
pub use engine::{AlertEngine, FurnaceMetricsEngine, ShiftLedger};

// API
pub use api::{ApiError, ApiResult, DashboardApi, FurnaceApi, ShiftApi, ShiftHistoryKey};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Forno Ops";
