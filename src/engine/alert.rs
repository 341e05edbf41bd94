// ==========================================
// 熔炉运营控制台 - 自动告警引擎
// ==========================================
// 职责: 按温度/收得率规则为运行中的熔炉追加自动告警
// 红线: 只作用于派生视图, 不修改存储中的告警列表
// 规则:
// - 温度: diff > 2×容差 告警, diff > 3×容差 严重 (容差 = 目标 × 5%)
// - 收得率: desvioMeta < -5 告警, < -10 严重
// - 已存在同类告警 (含人工录入) 时不再自动生成
// ==========================================

use crate::config::MetricsConfig;
use crate::domain::furnace::{Furnace, FurnaceAlert, FurnaceRaw};
use crate::domain::types::{AlertKind, FurnaceStatus, Severity};
use crate::engine::metrics::round1;
use crate::i18n::t_in;
use tracing::debug;

// ==========================================
// AlertEngine - 自动告警引擎
// ==========================================
pub struct AlertEngine {
    config: MetricsConfig,
}

impl AlertEngine {
    pub fn new(config: MetricsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成自动告警
    ///
    /// # 参数
    /// - `furnace`: 已计算指标的派生视图 (desvioMeta 已就绪)
    ///
    /// # 返回
    /// 追加了自动告警的派生视图; 非运行状态原样返回
    pub fn generate_automatic_alerts(&self, mut furnace: Furnace) -> Furnace {
        if furnace.raw.status != FurnaceStatus::Ativo {
            return furnace;
        }

        let mut generated = Vec::new();

        if !furnace.raw.has_alert_of(AlertKind::Temperatura) {
            if let Some(alert) = self.temperature_alert(&furnace.raw) {
                generated.push(alert);
            }
        }

        if !furnace.raw.has_alert_of(AlertKind::Rendimento) {
            if let Some(alert) = self.yield_alert(furnace.desvio_meta) {
                generated.push(alert);
            }
        }

        if !generated.is_empty() {
            debug!(
                forno_id = %furnace.raw.id,
                count = generated.len(),
                "自动告警已生成"
            );
        }

        furnace.raw.alertas.extend(generated);
        furnace
    }

    /// 温度规则
    ///
    /// diff 不超过告警倍数容差时返回 None
    pub fn temperature_alert(&self, raw: &FurnaceRaw) -> Option<FurnaceAlert> {
        let delta = raw.temperatura_atual - raw.temperatura_meta;
        let diff = delta.abs();
        let tolerance = raw.temperatura_meta * self.config.temperature_tolerance_pct;

        if diff <= tolerance * self.config.temperature_warning_factor {
            return None;
        }

        let severidade = if diff > tolerance * self.config.temperature_critical_factor {
            Severity::Critical
        } else {
            Severity::Warning
        };

        let key = if delta > 0.0 {
            "alert.temperature_above"
        } else {
            "alert.temperature_below"
        };
        let diff_text = round1(diff).to_string();
        let mensagem = t_in(&self.config.locale, key, &[("diff", diff_text.as_str())]);

        Some(FurnaceAlert::new(AlertKind::Temperatura, mensagem, severidade))
    }

    /// 收得率规则
    pub fn yield_alert(&self, desvio_meta: f64) -> Option<FurnaceAlert> {
        if desvio_meta >= self.config.yield_warning_threshold {
            return None;
        }

        let severidade = if desvio_meta < self.config.yield_critical_threshold {
            Severity::Critical
        } else {
            Severity::Warning
        };

        let diff_text = round1(desvio_meta.abs()).to_string();
        let mensagem = t_in(
            &self.config.locale,
            "alert.yield_below",
            &[("diff", diff_text.as_str())],
        );

        Some(FurnaceAlert::new(AlertKind::Rendimento, mensagem, severidade))
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(MetricsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::furnace::NewFurnace;

    fn create_test_furnace(atual: f64, rendimento_atual: f64) -> Furnace {
        let mut raw = NewFurnace {
            nome: "Forno 03".to_string(),
            planta: "Planta Sul".to_string(),
            tipo: "Vertical".to_string(),
            capacidade: 300.0,
            status: FurnaceStatus::Ativo,
            temperatura_atual: atual,
            temperatura_meta: 1250.0,
            rendimento_meta: 90.0,
            tenant_id: None,
        }
        .into_raw("3".to_string());
        raw.rendimento_atual = rendimento_atual;

        Furnace {
            desvio_meta: round1(rendimento_atual - 90.0),
            raw,
            media_movel: 0.0,
            desvio_padrao: 0.0,
        }
    }

    #[test]
    fn test_within_double_tolerance_no_alert() {
        let engine = AlertEngine::default();
        // diff = 100 ≤ 125
        let furnace = engine.generate_automatic_alerts(create_test_furnace(1150.0, 90.0));
        assert!(furnace.alertas().is_empty());
    }

    #[test]
    fn test_temperature_warning() {
        let engine = AlertEngine::default();
        // diff = 150 ∈ (125, 187.5]
        let furnace = engine.generate_automatic_alerts(create_test_furnace(1100.0, 90.0));

        assert_eq!(furnace.alert_count(), 1);
        let alert = &furnace.alertas()[0];
        assert_eq!(alert.tipo, AlertKind::Temperatura);
        assert_eq!(alert.severidade, Severity::Warning);
        assert_eq!(alert.mensagem, "Temperatura 150°C abaixo da meta");
    }

    #[test]
    fn test_temperature_critical() {
        let engine = AlertEngine::default();
        // diff = 250 > 187.5
        let furnace = engine.generate_automatic_alerts(create_test_furnace(1000.0, 90.0));
        assert_eq!(furnace.alertas()[0].severidade, Severity::Critical);

        let furnace = engine.generate_automatic_alerts(create_test_furnace(1450.0, 90.0));
        assert_eq!(furnace.alertas()[0].severidade, Severity::Critical);
        assert_eq!(furnace.alertas()[0].mensagem, "Temperatura 200°C acima da meta");
    }

    #[test]
    fn test_yield_warning_and_critical() {
        let engine = AlertEngine::default();

        let furnace = engine.generate_automatic_alerts(create_test_furnace(1250.0, 82.1));
        assert_eq!(furnace.alert_count(), 1);
        assert_eq!(furnace.alertas()[0].tipo, AlertKind::Rendimento);
        assert_eq!(furnace.alertas()[0].severidade, Severity::Warning);
        assert_eq!(furnace.alertas()[0].mensagem, "Rendimento 7.9% abaixo da meta");

        let furnace = engine.generate_automatic_alerts(create_test_furnace(1250.0, 78.0));
        assert_eq!(furnace.alertas()[0].severidade, Severity::Critical);

        // 恰好 -5 不触发
        let furnace = engine.generate_automatic_alerts(create_test_furnace(1250.0, 85.0));
        assert!(furnace.alertas().is_empty());
    }

    #[test]
    fn test_threshold_boundaries_are_inclusive() {
        let engine = AlertEngine::default();

        // diff = 125 = 容差×2: 不告警
        for atual in [1125.0, 1375.0] {
            let furnace = engine.generate_automatic_alerts(create_test_furnace(atual, 90.0));
            assert!(furnace.alertas().is_empty(), "atual={}", atual);
        }

        // diff = 187.5 = 容差×3: warning 而非 critical
        for atual in [1062.5, 1437.5] {
            let furnace = engine.generate_automatic_alerts(create_test_furnace(atual, 90.0));
            assert_eq!(furnace.alert_count(), 1);
            assert_eq!(furnace.alertas()[0].severidade, Severity::Warning, "atual={}", atual);
        }

        // desvioMeta = -10: warning
        let furnace = engine.generate_automatic_alerts(create_test_furnace(1250.0, 80.0));
        assert_eq!(furnace.alertas()[0].tipo, AlertKind::Rendimento);
        assert_eq!(furnace.alertas()[0].severidade, Severity::Warning);
        assert_eq!(furnace.alertas()[0].mensagem, "Rendimento 10% abaixo da meta");
    }

    #[test]
    fn test_existing_alert_suppresses_same_kind() {
        let engine = AlertEngine::default();
        let mut furnace = create_test_furnace(1000.0, 70.0);
        furnace.raw.alertas.push(FurnaceAlert::new(
            AlertKind::Temperatura,
            "Sensor em calibração",
            Severity::Info,
        ));

        let furnace = engine.generate_automatic_alerts(furnace);
        assert_eq!(furnace.alert_count(), 2);
        assert_eq!(furnace.alertas()[0].mensagem, "Sensor em calibração");
        assert_eq!(furnace.alertas()[1].tipo, AlertKind::Rendimento);
    }

    #[test]
    fn test_inactive_furnace_never_alerts() {
        let engine = AlertEngine::default();
        for status in [FurnaceStatus::Inativo, FurnaceStatus::Manutencao] {
            let mut furnace = create_test_furnace(0.0, 0.0);
            furnace.raw.status = status;
            let furnace = engine.generate_automatic_alerts(furnace);
            assert!(furnace.alertas().is_empty());
        }
    }

    #[test]
    fn test_locale_switch_changes_message() {
        let engine = AlertEngine::new(MetricsConfig {
            locale: "en".to_string(),
            ..Default::default()
        });
        let furnace = engine.generate_automatic_alerts(create_test_furnace(1100.0, 90.0));
        assert_eq!(furnace.alertas()[0].mensagem, "Temperature 150°C below target");
    }
}
