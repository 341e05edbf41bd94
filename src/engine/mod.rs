// ==========================================
// 熔炉运营控制台 - 引擎层
// ==========================================
// 职责: 指标派生、自动告警、班次台账状态机
// 红线: Engine 不拼 SQL, 指标引擎与班次台账互不调用
// ==========================================

pub mod alert;
pub mod clock;
pub mod furnace_metrics;
pub mod metrics;
pub mod shift_ledger;

// 重导出核心引擎
pub use alert::AlertEngine;
pub use clock::{Clock, FixedClock, SystemClock};
pub use furnace_metrics::{FleetSummary, FurnaceCard, FurnaceMetricsEngine};
pub use metrics::{
    absolute_deviation, deviation_from_target, gauge_percentage, moving_average, round1,
    standard_deviation,
};
pub use shift_ledger::{elapsed_since, ShiftLedger, ShiftLedgerError, ShiftLedgerResult};
