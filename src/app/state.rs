// ==========================================
// 熔炉运营控制台 - 应用状态
// ==========================================
// 职责: 装配仓储、引擎与 API 实例
// 模式: 内存 (种子数据) / SQLite (config_kv 覆写配置)
// ==========================================

use tracing::info;

use crate::api::{DashboardApi, FurnaceApi, ShiftApi};
use crate::config::{ConfigManager, ConsoleConfig, ConsoleConfigReader};
use crate::engine::clock::{Clock, SystemClock};
use crate::engine::shift_ledger::ShiftLedger;
use crate::repository::{
    FurnaceRepository, RepositoryResult, SeedData, SqliteFurnaceRepository,
    SqliteShiftRepository,
};

/// 应用状态
///
/// 单写者: 由调用方独占持有, 写接口经 `&mut` 访问
pub struct AppState {
    /// 数据库路径 (内存模式为 None)
    pub db_path: Option<String>,

    /// 生效配置
    pub config: ConsoleConfig,

    /// 熔炉API
    pub furnace_api: FurnaceApi,

    /// 班次API
    pub shift_api: ShiftApi,
}

impl AppState {
    /// 内存模式: 以种子数据构造
    pub fn in_memory(seed: SeedData, config: ConsoleConfig) -> Self {
        Self::in_memory_with_clock(seed, config, Box::new(SystemClock))
    }

    /// 内存模式 + 注入时钟 (测试)
    pub fn in_memory_with_clock(
        seed: SeedData,
        config: ConsoleConfig,
        clock: Box<dyn Clock>,
    ) -> Self {
        let (furnaces, shifts) = seed.into_memory_stores();
        info!(
            fornos = furnaces.len(),
            registros = shifts.len(),
            latency_ms = config.latency_ms,
            "AppState(内存) 初始化"
        );

        let ledger = ShiftLedger::new(Box::new(shifts)).with_clock(clock);
        Self {
            db_path: None,
            furnace_api: FurnaceApi::new(Box::new(furnaces), &config),
            shift_api: ShiftApi::new(ledger, &config),
            config,
        }
    }

    /// SQLite 模式
    ///
    /// 配置从 config_kv 读取, 未配置项取默认值
    pub async fn sqlite(db_path: &str) -> RepositoryResult<Self> {
        Self::sqlite_seeded(db_path, None).await
    }

    /// SQLite 模式, 库为空时写入种子数据
    pub async fn sqlite_seeded(db_path: &str, seed: Option<&SeedData>) -> RepositoryResult<Self> {
        let config = ConfigManager::new(db_path)?.load_console_config().await?;

        let mut furnaces = SqliteFurnaceRepository::new(db_path)?;
        let mut shifts = SqliteShiftRepository::new(db_path)?;

        if let Some(seed) = seed {
            if furnaces.find_all()?.is_empty() {
                seed.load_into(&mut furnaces, &mut shifts)?;
                info!(
                    fornos = seed.fornos.len(),
                    registros = seed.registros.len(),
                    "种子数据已写入数据库"
                );
            }
        }

        info!(db_path, latency_ms = config.latency_ms, "AppState(SQLite) 初始化");

        let ledger = ShiftLedger::new(Box::new(shifts));
        Ok(Self {
            db_path: Some(db_path.to_string()),
            furnace_api: FurnaceApi::new(Box::new(furnaces), &config),
            shift_api: ShiftApi::new(ledger, &config),
            config,
        })
    }

    /// 驾驶舱API (只读借用)
    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(&self.furnace_api)
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 FORNO_OPS_DB_PATH → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("FORNO_OPS_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./forno_ops.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("forno-ops");
        // 确保目录存在
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("forno_ops.db");
        }
    }

    path.to_string_lossy().to_string()
}
