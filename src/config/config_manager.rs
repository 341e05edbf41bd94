// ==========================================
// 熔炉运营控制台 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value, scope_id='global')
// ==========================================

use crate::config::config_reader::ConsoleConfigReader;
use crate::config::console_config::{ConsoleConfig, MetricsConfig};
use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::i18n::is_supported;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::str::FromStr;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Connection,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 与建表（幂等）。
    pub fn from_connection(conn: Connection) -> RepositoryResult<Self> {
        configure_sqlite_connection(&conn)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(config_key = key, value, "配置已更新");
        Ok(())
    }

    /// 读取并解析配置值, 缺失取默认值
    ///
    /// 格式错误时记录 warn 并回退默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> RepositoryResult<T>
    where
        T: FromStr + std::fmt::Display,
    {
        let raw = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default_value = %default,
                    "配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 获取所有配置的快照（JSON格式, 按 key 排序）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&config_map)?)
    }
}

// ==========================================
// ConsoleConfigReader Trait 实现
// ==========================================
#[async_trait(?Send)]
impl ConsoleConfigReader for ConfigManager {
    async fn get_latency_ms(&self) -> RepositoryResult<u64> {
        self.get_parsed_or_default(config_keys::LATENCY_MS, ConsoleConfig::default().latency_ms)
    }

    async fn get_single_open_shift(&self) -> RepositoryResult<bool> {
        let default = ConsoleConfig::default().single_open_shift;
        let raw = match self.get_config_value(config_keys::SINGLE_OPEN_SHIFT)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "on" => Ok(true),
            "0" | "false" | "no" | "n" | "off" => Ok(false),
            _ => {
                tracing::warn!(
                    config_key = config_keys::SINGLE_OPEN_SHIFT,
                    raw_value = %raw,
                    default_value = default,
                    "配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    async fn get_history_capacity(&self) -> RepositoryResult<usize> {
        let capacity = self.get_parsed_or_default(
            config_keys::HISTORY_CAPACITY,
            MetricsConfig::default().history_capacity,
        )?;
        // 容量为 0 时历史无意义, 回退默认值
        Ok(if capacity == 0 {
            MetricsConfig::default().history_capacity
        } else {
            capacity
        })
    }

    async fn get_moving_average_window(&self) -> RepositoryResult<usize> {
        let default = MetricsConfig::default().moving_average_window;
        let window = self.get_parsed_or_default(config_keys::MOVING_AVERAGE_WINDOW, default)?;
        // 窗口为 0 时移动平均恒为 0, 回退默认值
        if window == 0 {
            tracing::warn!(
                config_key = config_keys::MOVING_AVERAGE_WINDOW,
                default_value = default,
                "移动平均窗口不能为 0，使用默认值"
            );
            return Ok(default);
        }
        Ok(window)
    }

    async fn get_temperature_tolerance_pct(&self) -> RepositoryResult<f64> {
        self.get_parsed_or_default(
            config_keys::TEMPERATURE_TOLERANCE_PCT,
            MetricsConfig::default().temperature_tolerance_pct,
        )
    }

    async fn get_yield_warning_threshold(&self) -> RepositoryResult<f64> {
        self.get_parsed_or_default(
            config_keys::YIELD_WARNING_THRESHOLD,
            MetricsConfig::default().yield_warning_threshold,
        )
    }

    async fn get_yield_critical_threshold(&self) -> RepositoryResult<f64> {
        self.get_parsed_or_default(
            config_keys::YIELD_CRITICAL_THRESHOLD,
            MetricsConfig::default().yield_critical_threshold,
        )
    }

    async fn get_locale(&self) -> RepositoryResult<String> {
        let default = MetricsConfig::default().locale;
        let raw = match self.get_config_value(config_keys::LOCALE)? {
            Some(v) => v,
            None => return Ok(default),
        };

        let locale = raw.trim();
        if is_supported(locale) {
            Ok(locale.to_string())
        } else {
            tracing::warn!(
                config_key = config_keys::LOCALE,
                raw_value = %raw,
                default_value = %default,
                "不支持的语言，使用默认值"
            );
            Ok(default)
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 运行参数
    pub const LATENCY_MS: &str = "latency_ms";
    pub const SINGLE_OPEN_SHIFT: &str = "single_open_shift";

    // 指标
    pub const HISTORY_CAPACITY: &str = "history_capacity";
    pub const MOVING_AVERAGE_WINDOW: &str = "moving_average_window";
    pub const TEMPERATURE_TOLERANCE_PCT: &str = "temperature_tolerance_pct";
    pub const YIELD_WARNING_THRESHOLD: &str = "yield_warning_threshold";
    pub const YIELD_CRITICAL_THRESHOLD: &str = "yield_critical_threshold";

    // 文案
    pub const LOCALE: &str = "locale";
}
