// ==========================================
// 熔炉运营控制台 - 班次台账仓储
// ==========================================
// 红线: Repository 不含业务逻辑 (状态机在 ShiftLedger)
// 约束: 读数仅通过 append_reading 追加
// ==========================================

use crate::domain::shift::{ShiftReading, ShiftRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// ShiftRepository - 班次仓储接口
// ==========================================
pub trait ShiftRepository {
    /// 查询全部班次记录（含读数）
    fn find_all(&self) -> RepositoryResult<Vec<ShiftRecord>>;

    /// 按ID查询（含读数）
    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<ShiftRecord>>;

    /// 按熔炉查询（含读数, 顺序不保证）
    fn find_by_forno(&self, forno_id: &str) -> RepositoryResult<Vec<ShiftRecord>>;

    /// 新增班次记录（连同已有读数）
    fn insert(&mut self, record: &ShiftRecord) -> RepositoryResult<()>;

    /// 更新班次表头字段, 读数日志保持不变
    ///
    /// # 返回
    /// - Ok(false): 记录不存在
    fn update(&mut self, record: &ShiftRecord) -> RepositoryResult<bool>;

    /// 追加读数
    ///
    /// # 返回
    /// - Ok(false): 所属班次不存在
    fn append_reading(&mut self, reading: &ShiftReading) -> RepositoryResult<bool>;
}

// ==========================================
// InMemoryShiftRepository - 内存实现
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryShiftRepository {
    records: Vec<ShiftRecord>,
}

impl InMemoryShiftRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(records: Vec<ShiftRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ShiftRepository for InMemoryShiftRepository {
    fn find_all(&self) -> RepositoryResult<Vec<ShiftRecord>> {
        Ok(self.records.clone())
    }

    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<ShiftRecord>> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    fn find_by_forno(&self, forno_id: &str) -> RepositoryResult<Vec<ShiftRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.forno_id == forno_id)
            .cloned()
            .collect())
    }

    fn insert(&mut self, record: &ShiftRecord) -> RepositoryResult<()> {
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(RepositoryError::UniqueConstraintViolation(format!(
                "registro_turno.id={}",
                record.id
            )));
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn update(&mut self, record: &ShiftRecord) -> RepositoryResult<bool> {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(stored) => {
                let leituras = std::mem::take(&mut stored.leituras);
                *stored = record.clone();
                stored.leituras = leituras;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn append_reading(&mut self, reading: &ShiftReading) -> RepositoryResult<bool> {
        match self.records.iter_mut().find(|r| r.id == reading.registro_id) {
            Some(stored) => {
                stored.leituras.push(reading.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
