// ==========================================
// 熔炉运营控制台 - 应用层
// ==========================================
// 职责: 装配各层, 供控制台入口调用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
