// ==========================================
// 熔炉运营控制台 - 班次 API
// ==========================================
// 职责: 开班/结班/读数录入/历史与统计查询
// 流程: 调用方 → 表单校验 → 模拟延迟 → ShiftLedger
// ==========================================

use std::time::Duration;

use tracing::instrument;

use crate::api::error::ApiResult;
use crate::api::simulate_latency;
use crate::api::validator::{validate_closing, validate_new_shift, validate_reading};
use crate::config::ConsoleConfig;
use crate::domain::shift::{
    NewShift, OperatorStats, ShiftClosing, ShiftReading, ShiftRecord, ShiftStats,
};
use crate::engine::shift_ledger::ShiftLedger;

/// 班次历史查询键
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftHistoryKey {
    Forno(String),
    Operador(String),
}

// ==========================================
// ShiftApi - 班次 API
// ==========================================
pub struct ShiftApi {
    ledger: ShiftLedger,
    latency: Duration,
}

impl ShiftApi {
    /// 构造函数
    ///
    /// 单开班约束由配置决定, 覆盖 ledger 自身设置
    pub fn new(ledger: ShiftLedger, config: &ConsoleConfig) -> Self {
        Self {
            ledger: ledger.with_single_open_shift(config.single_open_shift),
            latency: Duration::from_millis(config.latency_ms),
        }
    }

    // ==========================================
    // 状态变更
    // ==========================================

    #[instrument(skip(self, new), fields(forno_id = %new.forno_id, operador = %new.operador))]
    pub async fn start_shift(&mut self, new: NewShift) -> ApiResult<ShiftRecord> {
        validate_new_shift(&new)?;
        simulate_latency(self.latency).await;
        Ok(self.ledger.start_shift(new)?)
    }

    /// 结班, 班次不存在返回 None
    #[instrument(skip(self, closing))]
    pub async fn end_shift(
        &mut self,
        id: &str,
        closing: ShiftClosing,
    ) -> ApiResult<Option<ShiftRecord>> {
        validate_closing(&closing)?;
        simulate_latency(self.latency).await;
        Ok(self.ledger.finish_shift(id, closing)?)
    }

    /// 录入读数, 班次不存在或已结束返回 None
    #[instrument(skip(self, observacao))]
    pub async fn record_reading(
        &mut self,
        registro_id: &str,
        temperatura: f64,
        observacao: Option<String>,
    ) -> ApiResult<Option<ShiftReading>> {
        validate_reading(temperatura)?;
        simulate_latency(self.latency).await;
        Ok(self.ledger.record_reading(registro_id, temperatura, observacao)?)
    }

    // ==========================================
    // 查询接口
    // ==========================================

    #[instrument(skip(self))]
    pub async fn get_open_shift(&self, forno_id: &str) -> ApiResult<Option<ShiftRecord>> {
        simulate_latency(self.latency).await;
        Ok(self.ledger.open_for_forno(forno_id)?)
    }

    #[instrument(skip(self))]
    pub async fn get_active_shift_for_operator(&self, nome: &str) -> ApiResult<Option<ShiftRecord>> {
        simulate_latency(self.latency).await;
        Ok(self.ledger.active_for_operator(nome)?)
    }

    /// 班次历史 (最近在前)
    #[instrument(skip(self))]
    pub async fn get_shift_history(&self, key: ShiftHistoryKey) -> ApiResult<Vec<ShiftRecord>> {
        simulate_latency(self.latency).await;
        let records = match key {
            ShiftHistoryKey::Forno(forno_id) => self.ledger.by_forno(&forno_id)?,
            ShiftHistoryKey::Operador(nome) => self.ledger.by_operator(&nome)?,
        };
        Ok(records)
    }

    #[instrument(skip(self))]
    pub async fn get_shift_stats(&self, registro_id: &str) -> ApiResult<Option<ShiftStats>> {
        simulate_latency(self.latency).await;
        Ok(self.ledger.shift_stats(registro_id)?)
    }

    #[instrument(skip(self))]
    pub async fn get_operator_stats(&self, nome: &str) -> ApiResult<OperatorStats> {
        simulate_latency(self.latency).await;
        Ok(self.ledger.operator_stats(nome)?)
    }

    /// 班次已进行时长 ("Xh Ymin"), 班次不存在返回 None
    pub async fn get_elapsed(&self, registro_id: &str) -> ApiResult<Option<String>> {
        simulate_latency(self.latency).await;
        let record = self.ledger.find(registro_id)?;
        Ok(record.map(|r| self.ledger.elapsed(&r)))
    }
}
