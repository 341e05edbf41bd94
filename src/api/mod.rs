// ==========================================
// 熔炉运营控制台 - API 层
// ==========================================
// 职责: 提供异步业务接口, 统一模拟响应延迟
// 约束: 单写者; 写接口取 &mut self, 调用开始后不可取消
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod furnace_api;
pub mod shift_api;
pub mod validator;

use std::time::Duration;

// 重导出核心类型
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult};
pub use furnace_api::FurnaceApi;
pub use shift_api::{ShiftApi, ShiftHistoryKey};

/// 模拟后端响应延迟
pub(crate) async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}
