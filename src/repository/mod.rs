// ==========================================
// 熔炉运营控制台 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽存储细节
// 实现: 内存 (种子数据) / SQLite
// ==========================================

pub mod error;
pub mod furnace_repo;
pub mod seed;
pub mod shift_repo;
pub mod sqlite_furnace_repo;
pub mod sqlite_shift_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use furnace_repo::{FurnaceRepository, InMemoryFurnaceRepository};
pub use seed::SeedData;
pub use shift_repo::{InMemoryShiftRepository, ShiftRepository};
pub use sqlite_furnace_repo::SqliteFurnaceRepository;
pub use sqlite_shift_repo::SqliteShiftRepository;
