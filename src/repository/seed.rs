// ==========================================
// 熔炉运营控制台 - 种子数据加载
// ==========================================
// 格式: { "fornos": [...], "registros": [...] }
// 用途: 构造内存仓储 / 初始化 SQLite 库
// ==========================================

use crate::domain::furnace::FurnaceRaw;
use crate::domain::shift::ShiftRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::furnace_repo::{FurnaceRepository, InMemoryFurnaceRepository};
use crate::repository::shift_repo::{InMemoryShiftRepository, ShiftRepository};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// 控制台种子数据集
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub fornos: Vec<FurnaceRaw>,
    #[serde(default)]
    pub registros: Vec<ShiftRecord>,
}

impl SeedData {
    pub fn from_json_str(json: &str) -> RepositoryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::InternalError(format!("读取种子文件失败 {}: {}", path.display(), e))
        })?;
        let seed = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            fornos = seed.fornos.len(),
            registros = seed.registros.len(),
            "种子数据已加载"
        );
        Ok(seed)
    }

    /// 拆分为内存仓储
    pub fn into_memory_stores(self) -> (InMemoryFurnaceRepository, InMemoryShiftRepository) {
        (
            InMemoryFurnaceRepository::with_seed(self.fornos),
            InMemoryShiftRepository::with_seed(self.registros),
        )
    }

    /// 写入任意仓储 (用于初始化空的 SQLite 库)
    pub fn load_into(
        &self,
        furnaces: &mut dyn FurnaceRepository,
        shifts: &mut dyn ShiftRepository,
    ) -> RepositoryResult<()> {
        for raw in &self.fornos {
            furnaces.insert(raw)?;
        }
        for record in &self.registros {
            shifts.insert(record)?;
        }
        Ok(())
    }
}
