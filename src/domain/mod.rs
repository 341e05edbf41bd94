// ==========================================
// 熔炉运营控制台 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod furnace;
pub mod shift;
pub mod types;

// 重导出核心类型
pub use furnace::{
    push_bounded, Furnace, FurnaceAlert, FurnacePatch, FurnaceRaw, LabResult, MixtureItem,
    NewFurnace, DEFAULT_HISTORY_CAPACITY,
};
pub use shift::{
    sort_most_recent_first, NewShift, OperatorStats, ShiftClosing, ShiftReading, ShiftRecord,
    ShiftStats,
};
pub use types::{
    AlertKind, DeviationBand, FurnaceStatus, Severity, ShiftCode, ShiftStatus, TemperatureBand,
};
