// ==========================================
// 熔炉运营控制台 - 熔炉 API
// ==========================================
// 职责: 熔炉读写接口, 每次读取经指标引擎派生
// 流程: 调用方 → 模拟延迟 → 仓储读写 → 指标引擎 → 结果
// ==========================================

use std::time::Duration;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::api::simulate_latency;
use crate::api::validator::{validate_furnace_patch, validate_new_furnace, validate_reading};
use crate::config::ConsoleConfig;
use crate::domain::furnace::{Furnace, FurnacePatch, NewFurnace};
use crate::engine::furnace_metrics::FurnaceMetricsEngine;
use crate::repository::furnace_repo::FurnaceRepository;

// ==========================================
// FurnaceApi - 熔炉 API
// ==========================================
pub struct FurnaceApi {
    repo: Box<dyn FurnaceRepository>,
    engine: FurnaceMetricsEngine,
    latency: Duration,
}

impl FurnaceApi {
    pub fn new(repo: Box<dyn FurnaceRepository>, config: &ConsoleConfig) -> Self {
        Self {
            repo,
            engine: FurnaceMetricsEngine::new(config.metrics.clone()),
            latency: Duration::from_millis(config.latency_ms),
        }
    }

    pub fn engine(&self) -> &FurnaceMetricsEngine {
        &self.engine
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询全部熔炉 (派生视图)
    #[instrument(skip(self))]
    pub async fn get_all_furnaces(&self) -> ApiResult<Vec<Furnace>> {
        simulate_latency(self.latency).await;
        let raws = self.repo.find_all()?;
        Ok(self.engine.derive_all(raws))
    }

    /// 按ID查询
    ///
    /// # 返回
    /// - Ok(None): 熔炉不存在
    #[instrument(skip(self))]
    pub async fn get_furnace_by_id(&self, id: &str) -> ApiResult<Option<Furnace>> {
        simulate_latency(self.latency).await;
        let raw = self.repo.find_by_id(id)?;
        Ok(raw.map(|r| self.engine.derive(r)))
    }

    // ==========================================
    // 写接口
    // ==========================================

    /// 新建熔炉
    #[instrument(skip(self, new), fields(nome = %new.nome))]
    pub async fn create_furnace(&mut self, new: NewFurnace) -> ApiResult<Furnace> {
        validate_new_furnace(&new)?;
        simulate_latency(self.latency).await;

        let raw = new.into_raw(Uuid::new_v4().to_string());
        self.repo.insert(&raw)?;
        info!(forno_id = %raw.id, "熔炉已创建");

        Ok(self.engine.derive(raw))
    }

    /// 部分更新熔炉
    ///
    /// 携带 temperaturaAtual 时推入温度历史 (超出容量淘汰最旧读数)
    ///
    /// # 返回
    /// - Ok(None): 熔炉不存在
    #[instrument(skip(self, patch))]
    pub async fn update_furnace(
        &mut self,
        id: &str,
        patch: FurnacePatch,
    ) -> ApiResult<Option<Furnace>> {
        validate_furnace_patch(&patch)?;
        if let Some(t) = patch.temperatura_atual {
            validate_reading(t)?;
        }
        simulate_latency(self.latency).await;

        let mut raw = match self.repo.find_by_id(id)? {
            Some(r) => r,
            None => return Ok(None),
        };

        patch.apply_to(&mut raw, self.engine.config().history_capacity);
        if !self.repo.update(&raw)? {
            return Ok(None);
        }

        Ok(Some(self.engine.derive(raw)))
    }

    /// 记录当前温度 (update_furnace 的快捷方式)
    pub async fn record_temperature(&mut self, id: &str, value: f64) -> ApiResult<Option<Furnace>> {
        self.update_furnace(id, FurnacePatch::temperature(value)).await
    }

    /// 删除熔炉
    #[instrument(skip(self))]
    pub async fn delete_furnace(&mut self, id: &str) -> ApiResult<bool> {
        simulate_latency(self.latency).await;
        let deleted = self.repo.delete(id)?;
        if deleted {
            info!(forno_id = id, "熔炉已删除");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::domain::types::FurnaceStatus;
    use crate::repository::furnace_repo::InMemoryFurnaceRepository;

    fn create_test_api() -> FurnaceApi {
        FurnaceApi::new(
            Box::new(InMemoryFurnaceRepository::new()),
            &ConsoleConfig::immediate(),
        )
    }

    fn new_furnace() -> NewFurnace {
        NewFurnace {
            nome: "Forno 07".to_string(),
            planta: "Planta Leste".to_string(),
            tipo: "Elétrico".to_string(),
            capacidade: 250.0,
            status: FurnaceStatus::Ativo,
            temperatura_atual: 1250.0,
            temperatura_meta: 1250.0,
            rendimento_meta: 90.0,
            tenant_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let mut api = create_test_api();
        let created = api.create_furnace(new_furnace()).await.unwrap();

        let fetched = api.get_furnace_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(fetched.raw.nome, "Forno 07");
        assert_eq!(api.get_all_furnaces().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_form() {
        let mut api = create_test_api();
        let mut invalid = new_furnace();
        invalid.capacidade = 0.0;
        let err = api.create_furnace(invalid).await.unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_returns_none() {
        let mut api = create_test_api();
        let result = api
            .update_furnace("missing", FurnacePatch::temperature(1200.0))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_record_temperature_appends_history() {
        let mut api = create_test_api();
        let id = api.create_furnace(new_furnace()).await.unwrap().raw.id;

        api.record_temperature(&id, 1240.0).await.unwrap();
        let furnace = api.record_temperature(&id, 1260.0).await.unwrap().unwrap();

        assert_eq!(furnace.raw.temperatura_historico, vec![1240.0, 1260.0]);
        assert_eq!(furnace.media_movel, 1250.0);
    }

    #[tokio::test]
    async fn test_delete() {
        let mut api = create_test_api();
        let id = api.create_furnace(new_furnace()).await.unwrap().raw.id;
        assert!(api.delete_furnace(&id).await.unwrap());
        assert!(!api.delete_furnace(&id).await.unwrap());
        assert!(api.get_furnace_by_id(&id).await.unwrap().is_none());
    }
}
