// ==========================================
// 熔炉运营控制台 - 驾驶舱 API
// ==========================================
// 职责: 车间汇总与熔炉卡片聚合查询
// 架构: DashboardApi → FurnaceApi (派生视图) → 指标引擎分级
// ==========================================

use crate::api::error::ApiResult;
use crate::api::furnace_api::FurnaceApi;
use crate::engine::furnace_metrics::{FleetSummary, FurnaceCard};
use tracing::{debug, instrument};

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 只读, 借用 FurnaceApi 读取派生视图
pub struct DashboardApi<'a> {
    furnace_api: &'a FurnaceApi,
}

impl<'a> DashboardApi<'a> {
    pub fn new(furnace_api: &'a FurnaceApi) -> Self {
        Self { furnace_api }
    }

    /// 车间汇总 (总数 / 运行中 / 严重告警 / 告警总数)
    #[instrument(skip(self))]
    pub async fn fleet_summary(&self) -> ApiResult<FleetSummary> {
        let furnaces = self.furnace_api.get_all_furnaces().await?;
        let summary = self.furnace_api.engine().fleet_summary(&furnaces);
        debug!(?summary, "车间汇总");
        Ok(summary)
    }

    /// 熔炉卡片列表
    #[instrument(skip(self))]
    pub async fn furnace_cards(&self) -> ApiResult<Vec<FurnaceCard>> {
        let furnaces = self.furnace_api.get_all_furnaces().await?;
        let engine = self.furnace_api.engine();
        Ok(furnaces.iter().map(|f| engine.card(f)).collect())
    }

    /// 单个熔炉卡片
    #[instrument(skip(self))]
    pub async fn furnace_card(&self, id: &str) -> ApiResult<Option<FurnaceCard>> {
        let furnace = self.furnace_api.get_furnace_by_id(id).await?;
        Ok(furnace.map(|f| self.furnace_api.engine().card(&f)))
    }
}
