// ==========================================
// SQLite 仓储与配置集成测试
// ==========================================
// 测试目标: SqliteFurnaceRepository / SqliteShiftRepository / ConfigManager / AppState(SQLite)
// ==========================================


use chrono::NaiveDate;
use forno_ops::app::AppState;
use forno_ops::config::{config_keys, ConfigManager, ConsoleConfigReader};
use forno_ops::domain::furnace::FurnacePatch;
use forno_ops::domain::shift::ShiftReading;
use forno_ops::domain::types::{ShiftCode, ShiftStatus};
use forno_ops::repository::{
    FurnaceRepository, RepositoryError, ShiftRepository, SqliteFurnaceRepository,
    SqliteShiftRepository,
};
use test_helpers::{create_test_db, create_test_new_shift, create_test_seed};

// ==========================================
// 熔炉仓储
// ==========================================

#[test]
fn test_furnace_round_trip_with_json_columns() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let mut repo = SqliteFurnaceRepository::new(&db_path).unwrap();
    let seed = create_test_seed();

    for raw in &seed.fornos {
        repo.insert(raw).unwrap();
    }

    let all = repo.find_all().unwrap();
    assert_eq!(all, seed.fornos);

    let third = repo.find_by_id("3").unwrap().unwrap();
    assert_eq!(third.alertas.len(), 1);
    assert!(repo.find_by_id("99").unwrap().is_none());
}

#[test]
fn test_furnace_update_delete_and_duplicate() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let mut repo = SqliteFurnaceRepository::new(&db_path).unwrap();
    let mut raw = create_test_seed().fornos.remove(0);
    repo.insert(&raw).unwrap();

    let err = repo.insert(&raw).unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));

    FurnacePatch::temperature(1262.0).apply_to(&mut raw, 24);
    assert!(repo.update(&raw).unwrap());
    let stored = repo.find_by_id("1").unwrap().unwrap();
    assert_eq!(stored.temperatura_historico.len(), 13);
    assert_eq!(stored.temperatura_atual, 1262.0);

    assert!(repo.delete("1").unwrap());
    assert!(!repo.delete("1").unwrap());
}

// ==========================================
// 班次仓储
// ==========================================

#[test]
fn test_shift_round_trip_and_reading_order() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let mut repo = SqliteShiftRepository::new(&db_path).unwrap();
    let seed = create_test_seed();

    for record in &seed.registros {
        repo.insert(record).unwrap();
    }
    assert_eq!(repo.find_by_id("r-001").unwrap().unwrap(), seed.registros[0]);

    let hora = NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(7, 15, 0)
        .unwrap();
    for (i, t) in [1255.0, 1249.0, 1251.0].into_iter().enumerate() {
        let appended = repo
            .append_reading(&ShiftReading {
                id: format!("l-10{}", i),
                registro_id: "r-002".to_string(),
                hora,
                temperatura: t,
                observacao: None,
            })
            .unwrap();
        assert!(appended);
    }

    let open = repo.find_by_id("r-002").unwrap().unwrap();
    let temps: Vec<f64> = open.leituras.iter().map(|l| l.temperatura).collect();
    assert_eq!(temps, vec![1255.0, 1249.0, 1251.0]);
    assert_eq!(repo.find_by_forno("1").unwrap().len(), 2);
}

#[test]
fn test_shift_update_keeps_readings_and_unknown_append() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let mut repo = SqliteShiftRepository::new(&db_path).unwrap();
    let mut record = create_test_seed().registros.remove(0);
    repo.insert(&record).unwrap();

    record.observacoes = Some("Revisado".to_string());
    record.leituras.clear();
    assert!(repo.update(&record).unwrap());

    let stored = repo.find_by_id("r-001").unwrap().unwrap();
    assert_eq!(stored.observacoes.as_deref(), Some("Revisado"));
    assert_eq!(stored.leituras.len(), 2);
    assert_eq!(stored.status, ShiftStatus::Fechado);

    let orphan = ShiftReading {
        id: "l-x".to_string(),
        registro_id: "missing".to_string(),
        hora: stored.leituras[0].hora,
        temperatura: 1200.0,
        observacao: None,
    };
    assert!(!repo.append_reading(&orphan).unwrap());
}

// ==========================================
// 配置
// ==========================================

#[tokio::test]
async fn test_config_defaults_when_empty() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let manager = ConfigManager::new(&db_path).unwrap();
    let config = manager.load_console_config().await.unwrap();

    assert_eq!(config.latency_ms, 300);
    assert!(config.single_open_shift);
    assert_eq!(config.metrics.history_capacity, 24);
    assert_eq!(config.metrics.moving_average_window, 12);
    assert_eq!(config.metrics.locale, "pt-BR");
}

// ==========================================
// AppState (SQLite)
// ==========================================

#[tokio::test]
async fn test_sqlite_state_seeds_once_and_applies_config() {
    println!("\n=== 测试：SQLite 模式装配 ===");
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let manager = ConfigManager::new(&db_path).unwrap();
    manager.set_config_value(config_keys::LATENCY_MS, "0").unwrap();
    manager.set_config_value(config_keys::LOCALE, "en").unwrap();
    manager.set_config_value(config_keys::SINGLE_OPEN_SHIFT, "false").unwrap();

    let seed = create_test_seed();
    let mut state = AppState::sqlite_seeded(&db_path, Some(&seed)).await.unwrap();
    assert_eq!(state.config.latency_ms, 0);
    assert!(!state.config.single_open_shift);

    let furnace = state.furnace_api.get_furnace_by_id("2").await.unwrap().unwrap();
    assert_eq!(furnace.alertas()[0].mensagem, "Temperature 150°C below target");

    // 单开班约束已关闭: 熔炉1可再开一个班次
    let record = state
        .shift_api
        .start_shift(create_test_new_shift("1", "Pedro Lima", ShiftCode::A, 7))
        .await
        .unwrap();
    state
        .shift_api
        .record_reading(&record.id, 1244.0, None)
        .await
        .unwrap()
        .unwrap();
    drop(state);

    // 重新打开: 已有数据, 种子不重复写入
    let state = AppState::sqlite_seeded(&db_path, Some(&seed)).await.unwrap();
    assert_eq!(state.furnace_api.get_all_furnaces().await.unwrap().len(), 3);
    let stats = state.shift_api.get_shift_stats(&record.id).await.unwrap().unwrap();
    assert_eq!(stats.total, 1);
}
