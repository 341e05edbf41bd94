// ==========================================
// 熔炉运营控制台 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换仓储/台账错误为用户可读的错误消息
// 说明: 资源不存在以 Option::None 返回, 不属于错误
// ==========================================

use crate::engine::shift_ledger::ShiftLedgerError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::Serialization(e) => {
                ApiError::DatabaseError(format!("存储数据解析失败: {}", e))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ShiftLedgerError 转换
// ==========================================
impl From<ShiftLedgerError> for ApiError {
    fn from(err: ShiftLedgerError) -> Self {
        match err {
            ShiftLedgerError::ShiftAlreadyOpen {
                forno_id,
                registro_id,
            } => ApiError::BusinessRuleViolation(format!(
                "熔炉{}已有进行中的班次{}",
                forno_id, registro_id
            )),
            ShiftLedgerError::Repository(e) => e.into(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
