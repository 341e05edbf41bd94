// ==========================================
// 熔炉运营控制台 - 熔炉数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 温度历史窗口、派生指标均由引擎处理
// ==========================================

use crate::domain::furnace::FurnaceRaw;
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// FurnaceRepository - 熔炉仓储接口
// ==========================================
/// 熔炉原始记录存储
///
/// 单写者模型: 写操作取 `&mut self`, 实现无需加锁
pub trait FurnaceRepository {
    /// 查询全部熔炉（按插入顺序）
    fn find_all(&self) -> RepositoryResult<Vec<FurnaceRaw>>;

    /// 按ID查询
    ///
    /// # 返回
    /// - Ok(Some(FurnaceRaw)): 找到
    /// - Ok(None): 未找到
    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<FurnaceRaw>>;

    /// 新增熔炉, ID 重复时返回 UniqueConstraintViolation
    fn insert(&mut self, raw: &FurnaceRaw) -> RepositoryResult<()>;

    /// 整体覆盖更新
    ///
    /// # 返回
    /// - Ok(true): 已更新
    /// - Ok(false): 记录不存在
    fn update(&mut self, raw: &FurnaceRaw) -> RepositoryResult<bool>;

    /// 删除熔炉
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): 记录不存在
    fn delete(&mut self, id: &str) -> RepositoryResult<bool>;
}

// ==========================================
// InMemoryFurnaceRepository - 内存实现
// ==========================================
/// 基于数组的内存熔炉仓储
///
/// 数据由构造方注入 (种子数据), 不使用全局状态
#[derive(Debug, Clone, Default)]
pub struct InMemoryFurnaceRepository {
    records: Vec<FurnaceRaw>,
}

impl InMemoryFurnaceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以种子数据构造
    pub fn with_seed(records: Vec<FurnaceRaw>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FurnaceRepository for InMemoryFurnaceRepository {
    fn find_all(&self) -> RepositoryResult<Vec<FurnaceRaw>> {
        Ok(self.records.clone())
    }

    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<FurnaceRaw>> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    fn insert(&mut self, raw: &FurnaceRaw) -> RepositoryResult<()> {
        if self.records.iter().any(|r| r.id == raw.id) {
            return Err(RepositoryError::UniqueConstraintViolation(format!(
                "forno.id={}",
                raw.id
            )));
        }
        self.records.push(raw.clone());
        Ok(())
    }

    fn update(&mut self, raw: &FurnaceRaw) -> RepositoryResult<bool> {
        match self.records.iter_mut().find(|r| r.id == raw.id) {
            Some(stored) => {
                *stored = raw.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&mut self, id: &str) -> RepositoryResult<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        Ok(self.records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::furnace::NewFurnace;
    use crate::domain::types::FurnaceStatus;

    fn raw(id: &str) -> FurnaceRaw {
        NewFurnace {
            nome: format!("Forno {}", id),
            planta: "Planta Sul".to_string(),
            tipo: "Vertical".to_string(),
            capacidade: 300.0,
            status: FurnaceStatus::Ativo,
            temperatura_atual: 1200.0,
            temperatura_meta: 1250.0,
            rendimento_meta: 90.0,
            tenant_id: None,
        }
        .into_raw(id.to_string())
    }

    #[test]
    fn test_insert_and_find() {
        let mut repo = InMemoryFurnaceRepository::new();
        repo.insert(&raw("1")).unwrap();
        repo.insert(&raw("2")).unwrap();

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find_by_id("2").unwrap().unwrap().nome, "Forno 2");
        assert!(repo.find_by_id("9").unwrap().is_none());
    }

    #[test]
    fn test_insert_duplicate_id_rejected() {
        let mut repo = InMemoryFurnaceRepository::with_seed(vec![raw("1")]);
        let err = repo.insert(&raw("1")).unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }

    #[test]
    fn test_update_and_delete_missing() {
        let mut repo = InMemoryFurnaceRepository::with_seed(vec![raw("1")]);
        let mut changed = raw("1");
        changed.nome = "Forno Principal".to_string();

        assert!(repo.update(&changed).unwrap());
        assert!(!repo.update(&raw("7")).unwrap());
        assert_eq!(repo.find_by_id("1").unwrap().unwrap().nome, "Forno Principal");

        assert!(repo.delete("1").unwrap());
        assert!(!repo.delete("1").unwrap());
        assert!(repo.is_empty());
    }
}
