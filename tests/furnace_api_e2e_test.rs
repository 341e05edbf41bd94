// ==========================================
// 熔炉 API 端到端测试
// ==========================================
// 测试目标: 种子数据 → FurnaceApi → 指标引擎 → 派生视图
// 覆盖: 读取派生、温度历史滑动窗口、告警不落库、驾驶舱汇总、模拟延迟
// ==========================================


use std::time::{Duration, Instant};

use forno_ops::app::AppState;
use forno_ops::config::ConsoleConfig;
use forno_ops::domain::furnace::{FurnaceAlert, FurnacePatch, NewFurnace};
use forno_ops::domain::types::{
    AlertKind, DeviationBand, FurnaceStatus, Severity, TemperatureBand,
};
use test_helpers::{create_test_seed, create_test_state};

// ==========================================
// 读取派生
// ==========================================

#[tokio::test]
async fn test_seed_furnace_derived_on_read() {
    println!("\n=== 测试：种子熔炉读取派生 ===");
    let state = create_test_state();

    let furnace = state
        .furnace_api
        .get_furnace_by_id("1")
        .await
        .expect("查询失败")
        .expect("熔炉1应存在");

    assert_eq!(furnace.media_movel, 1250.0);
    assert_eq!(furnace.desvio_meta, 1.2);
    assert!(furnace.alertas().is_empty());
    assert_eq!(furnace.raw.temperatura_historico.len(), 12);
    println!("  mediaMovel={} desvioPadrao={}", furnace.media_movel, furnace.desvio_padrao);
}

#[tokio::test]
async fn test_unknown_furnace_is_absent() {
    let state = create_test_state();
    let furnace = state.furnace_api.get_furnace_by_id("99").await.unwrap();
    assert!(furnace.is_none());
}

#[tokio::test]
async fn test_warning_furnace_gets_automatic_alerts() {
    println!("\n=== 测试：自动告警 ===");
    let state = create_test_state();
    let furnace = state.furnace_api.get_furnace_by_id("2").await.unwrap().unwrap();

    assert_eq!(furnace.media_movel, 1123.3);
    assert_eq!(furnace.desvio_meta, -7.9);
    assert_eq!(furnace.alert_count(), 2);

    let temp = &furnace.alertas()[0];
    assert_eq!(temp.tipo, AlertKind::Temperatura);
    assert_eq!(temp.severidade, Severity::Warning);
    assert_eq!(temp.mensagem, "Temperatura 150°C abaixo da meta");

    let rendimento = &furnace.alertas()[1];
    assert_eq!(rendimento.tipo, AlertKind::Rendimento);
    assert_eq!(rendimento.severidade, Severity::Warning);
    assert_eq!(rendimento.mensagem, "Rendimento 7.9% abaixo da meta");
}

#[tokio::test]
async fn test_get_all_keeps_seed_order() {
    let state = create_test_state();
    let ids: Vec<String> = state
        .furnace_api
        .get_all_furnaces()
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.raw.id)
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

// ==========================================
// 温度历史滑动窗口
// ==========================================

#[tokio::test]
async fn test_history_bounded_to_24_after_25_updates() {
    println!("\n=== 测试：温度历史滑动窗口 ===");
    let mut state = create_test_state();

    for i in 0..25 {
        state
            .furnace_api
            .update_furnace("1", FurnacePatch::temperature(1200.0 + i as f64))
            .await
            .unwrap()
            .expect("熔炉1应存在");
    }

    let furnace = state.furnace_api.get_furnace_by_id("1").await.unwrap().unwrap();
    let history = &furnace.raw.temperatura_historico;

    assert_eq!(history.len(), 24);
    assert_eq!(history.first(), Some(&1201.0));
    assert_eq!(history.last(), Some(&1224.0));
    assert_eq!(furnace.raw.temperatura_atual, 1224.0);
    assert_eq!(furnace.media_movel, 1218.5);
}

#[tokio::test]
async fn test_patch_without_temperature_keeps_history() {
    let mut state = create_test_state();
    let patch = FurnacePatch {
        rendimento_atual: Some(80.0),
        ..Default::default()
    };
    let furnace = state.furnace_api.update_furnace("1", patch).await.unwrap().unwrap();

    assert_eq!(furnace.raw.temperatura_historico.len(), 12);
    assert_eq!(furnace.desvio_meta, -10.0);
    // -10 不小于 -10, 仍为 warning
    assert_eq!(furnace.alertas()[0].severidade, Severity::Warning);
}

#[tokio::test]
async fn test_oversized_seed_history_is_clamped_on_read() {
    let mut seed = create_test_seed();
    seed.fornos[0].temperatura_historico = (1..=30).map(|i| 1230.0 + i as f64).collect();
    let state = AppState::in_memory(seed, ConsoleConfig::immediate());

    let furnace = state.furnace_api.get_furnace_by_id("1").await.unwrap().unwrap();
    let history = &furnace.raw.temperatura_historico;
    assert_eq!(history.len(), 24);
    assert_eq!(history.first(), Some(&1237.0));
    assert_eq!(history.last(), Some(&1260.0));
    // 1249..=1260 的均值
    assert_eq!(furnace.media_movel, 1254.5);
}

// ==========================================
// 告警不落库
// ==========================================

#[tokio::test]
async fn test_automatic_alerts_are_not_persisted() {
    println!("\n=== 测试：自动告警不回写存储 ===");
    let mut state = create_test_state();

    let first = state.furnace_api.get_furnace_by_id("2").await.unwrap().unwrap();
    let second = state.furnace_api.get_furnace_by_id("2").await.unwrap().unwrap();
    assert_eq!(first.alert_count(), 2);
    assert_eq!(second.alert_count(), 2);

    // 切换为维护状态后, 不再生成自动告警且存储中无残留
    let patch = FurnacePatch {
        status: Some(FurnaceStatus::Manutencao),
        ..Default::default()
    };
    let idle = state.furnace_api.update_furnace("2", patch).await.unwrap().unwrap();
    assert!(idle.alertas().is_empty());
}

#[tokio::test]
async fn test_manual_alert_suppresses_automatic_of_same_kind() {
    let mut state = create_test_state();
    let patch = FurnacePatch {
        temperatura_atual: Some(1000.0),
        alertas: Some(vec![FurnaceAlert::new(
            AlertKind::Temperatura,
            "Termopar substituído",
            Severity::Info,
        )]),
        ..Default::default()
    };

    let furnace = state.furnace_api.update_furnace("1", patch).await.unwrap().unwrap();
    let temperature_alerts: Vec<_> = furnace
        .alertas()
        .iter()
        .filter(|a| a.tipo == AlertKind::Temperatura)
        .collect();
    assert_eq!(temperature_alerts.len(), 1);
    assert_eq!(temperature_alerts[0].mensagem, "Termopar substituído");
}

// ==========================================
// 写接口
// ==========================================

#[tokio::test]
async fn test_create_and_delete_furnace() {
    let mut state = create_test_state();
    let created = state
        .furnace_api
        .create_furnace(NewFurnace {
            nome: "Forno 05".to_string(),
            planta: "Planta Leste".to_string(),
            tipo: "Elétrico".to_string(),
            capacidade: 200.0,
            status: FurnaceStatus::Inativo,
            temperatura_atual: 25.0,
            temperatura_meta: 1250.0,
            rendimento_meta: 90.0,
            tenant_id: Some("1".to_string()),
        })
        .await
        .unwrap();

    assert!(created.raw.temperatura_historico.is_empty());
    assert_eq!(state.furnace_api.get_all_furnaces().await.unwrap().len(), 4);

    let id = created.raw.id.clone();
    assert!(state.furnace_api.delete_furnace(&id).await.unwrap());
    assert_eq!(state.furnace_api.get_all_furnaces().await.unwrap().len(), 3);
}

// ==========================================
// 驾驶舱
// ==========================================

#[tokio::test]
async fn test_dashboard_summary_and_cards() {
    println!("\n=== 测试：驾驶舱汇总 ===");
    let state = create_test_state();
    let dashboard = state.dashboard();

    let summary = dashboard.fleet_summary().await.unwrap();
    assert_eq!(summary.total_fornos, 3);
    assert_eq!(summary.fornos_ativos, 2);
    assert_eq!(summary.alertas_criticos, 0);
    assert_eq!(summary.alertas_totais, 3);

    let cards = dashboard.furnace_cards().await.unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].temperature_band, TemperatureBand::Ok);
    assert_eq!(cards[0].deviation_band, DeviationBand::Ok);
    assert_eq!(cards[1].temperature_band, TemperatureBand::Critico);
    assert_eq!(cards[1].deviation_band, DeviationBand::Critical);
    assert_eq!(cards[2].status_label, "Manutenção");

    assert!(dashboard.furnace_card("99").await.unwrap().is_none());
}

// ==========================================
// 模拟延迟
// ==========================================

#[tokio::test]
async fn test_calls_resolve_after_configured_latency() {
    let config = ConsoleConfig {
        latency_ms: 30,
        ..ConsoleConfig::default()
    };
    let state = AppState::in_memory(create_test_seed(), config);

    let started = Instant::now();
    state.furnace_api.get_all_furnaces().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(30));
}
