// ==========================================
// 熔炉运营控制台 - 熔炉指标引擎
// ==========================================
// 职责: 由原始记录派生只读视图
// 输入: FurnaceRaw (存储原样)
// 输出: Furnace (mediaMovel / desvioPadrao / desvioMeta + 自动告警)
// 红线: 每次读取重新计算, 派生结果不回写存储
// ==========================================

use crate::config::MetricsConfig;
use crate::domain::furnace::{Furnace, FurnaceRaw};
use crate::domain::types::{DeviationBand, FurnaceStatus, Severity, TemperatureBand};
use crate::engine::alert::AlertEngine;
use crate::engine::metrics::{absolute_deviation, gauge_percentage, moving_average, standard_deviation};
use serde::{Deserialize, Serialize};

// ==========================================
// 展示视图
// ==========================================

/// 熔炉卡片 (控制台列表项)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnaceCard {
    pub id: String,
    pub nome: String,
    pub planta: String,
    pub status: FurnaceStatus,
    pub status_label: String,
    pub temperatura_atual: f64,
    pub temperatura_meta: f64,
    pub temperature_band: TemperatureBand,
    pub band_color: String,
    pub gauge_percent: f64,
    pub desvio_meta: f64,
    pub deviation_band: DeviationBand,
    pub alert_count: usize,
    pub critical_alert_count: usize,
}

/// 车间汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_fornos: usize,
    pub fornos_ativos: usize,
    pub alertas_criticos: usize,
    pub alertas_totais: usize,
}

// ==========================================
// FurnaceMetricsEngine - 熔炉指标引擎
// ==========================================
pub struct FurnaceMetricsEngine {
    config: MetricsConfig,
    alerts: AlertEngine,
}

impl FurnaceMetricsEngine {
    pub fn new(config: MetricsConfig) -> Self {
        Self {
            alerts: AlertEngine::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算派生指标 (不含自动告警)
    pub fn compute_metrics(&self, mut raw: FurnaceRaw) -> Furnace {
        // 种子/外部写入的历史可能超出容量
        raw.clamp_history(self.config.history_capacity);

        let media_movel = moving_average(
            &raw.temperatura_historico,
            Some(self.config.moving_average_window),
        );
        let desvio_padrao = standard_deviation(&raw.temperatura_historico);
        let desvio_meta = absolute_deviation(raw.rendimento_atual, raw.rendimento_meta);

        Furnace {
            raw,
            media_movel,
            desvio_padrao,
            desvio_meta,
        }
    }

    /// 完整派生: 指标 + 自动告警
    pub fn derive(&self, raw: FurnaceRaw) -> Furnace {
        self.alerts.generate_automatic_alerts(self.compute_metrics(raw))
    }

    pub fn derive_all(&self, raws: Vec<FurnaceRaw>) -> Vec<Furnace> {
        raws.into_iter().map(|raw| self.derive(raw)).collect()
    }

    // ==========================================
    // 展示分级
    // ==========================================

    /// 温度带
    ///
    /// # 规则
    /// - diff ≤ 容差 → Ok
    /// - diff ≤ 2 × 容差 → Atencao
    /// - 否则 → Critico
    pub fn temperature_band(&self, atual: f64, meta: f64) -> TemperatureBand {
        let diff = (atual - meta).abs();
        let tolerance = meta * self.config.temperature_tolerance_pct;

        if diff <= tolerance {
            TemperatureBand::Ok
        } else if diff <= tolerance * self.config.temperature_warning_factor {
            TemperatureBand::Atencao
        } else {
            TemperatureBand::Critico
        }
    }

    /// 收得率偏差带
    pub fn deviation_band(&self, desvio_meta: f64) -> DeviationBand {
        let abs = desvio_meta.abs();
        if abs <= 2.0 {
            DeviationBand::Ok
        } else if abs <= 5.0 {
            DeviationBand::Warning
        } else {
            DeviationBand::Critical
        }
    }

    pub fn gauge_percentage(&self, value: f64) -> f64 {
        gauge_percentage(value, self.config.gauge_scale)
    }

    /// 生成卡片视图
    pub fn card(&self, furnace: &Furnace) -> FurnaceCard {
        let raw = &furnace.raw;
        let band = self.temperature_band(raw.temperatura_atual, raw.temperatura_meta);

        FurnaceCard {
            id: raw.id.clone(),
            nome: raw.nome.clone(),
            planta: raw.planta.clone(),
            status: raw.status,
            status_label: raw.status.label().to_string(),
            temperatura_atual: raw.temperatura_atual,
            temperatura_meta: raw.temperatura_meta,
            temperature_band: band,
            band_color: band.color().to_string(),
            gauge_percent: self.gauge_percentage(raw.temperatura_atual),
            desvio_meta: furnace.desvio_meta,
            deviation_band: self.deviation_band(furnace.desvio_meta),
            alert_count: furnace.alert_count(),
            critical_alert_count: furnace.critical_alert_count(),
        }
    }

    /// 车间汇总 (基于派生视图, 含自动告警)
    pub fn fleet_summary(&self, furnaces: &[Furnace]) -> FleetSummary {
        FleetSummary {
            total_fornos: furnaces.len(),
            fornos_ativos: furnaces
                .iter()
                .filter(|f| f.raw.status == FurnaceStatus::Ativo)
                .count(),
            alertas_criticos: furnaces
                .iter()
                .flat_map(|f| f.alertas())
                .filter(|a| a.severidade == Severity::Critical)
                .count(),
            alertas_totais: furnaces.iter().map(|f| f.alert_count()).sum(),
        }
    }
}

impl Default for FurnaceMetricsEngine {
    fn default() -> Self {
        Self::new(MetricsConfig::default())
    }
}
