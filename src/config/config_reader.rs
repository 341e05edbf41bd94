// ==========================================
// 熔炉运营控制台 - 控制台配置读取 Trait
// ==========================================
// 职责: 定义引擎/API 所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::console_config::{ConsoleConfig, MetricsConfig};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ConsoleConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
// 单写者模型, 实现者不要求 Sync
#[async_trait(?Send)]
pub trait ConsoleConfigReader {
    // ===== 运行参数 =====

    /// 获取模拟响应延迟（毫秒）
    ///
    /// # 默认值
    /// - 300
    async fn get_latency_ms(&self) -> RepositoryResult<u64>;

    /// 是否限制每个熔炉仅一个进行中班次
    ///
    /// # 默认值
    /// - true
    async fn get_single_open_shift(&self) -> RepositoryResult<bool>;

    // ===== 指标参数 =====

    /// 温度历史容量
    ///
    /// # 默认值
    /// - 24
    async fn get_history_capacity(&self) -> RepositoryResult<usize>;

    /// 移动平均窗口
    ///
    /// # 默认值
    /// - 12
    async fn get_moving_average_window(&self) -> RepositoryResult<usize>;

    /// 温度容差比例
    ///
    /// # 默认值
    /// - 0.05
    async fn get_temperature_tolerance_pct(&self) -> RepositoryResult<f64>;

    /// 收得率告警阈值
    ///
    /// # 默认值
    /// - -5.0
    async fn get_yield_warning_threshold(&self) -> RepositoryResult<f64>;

    /// 收得率严重阈值
    ///
    /// # 默认值
    /// - -10.0
    async fn get_yield_critical_threshold(&self) -> RepositoryResult<f64>;

    /// 告警文案语言
    ///
    /// # 默认值
    /// - pt-BR
    async fn get_locale(&self) -> RepositoryResult<String>;

    /// 汇总为 ConsoleConfig
    ///
    /// 未列出的参数（倍数、量程）取默认值
    async fn load_console_config(&self) -> RepositoryResult<ConsoleConfig> {
        let defaults = MetricsConfig::default();
        let metrics = MetricsConfig {
            history_capacity: self.get_history_capacity().await?,
            moving_average_window: self.get_moving_average_window().await?,
            temperature_tolerance_pct: self.get_temperature_tolerance_pct().await?,
            yield_warning_threshold: self.get_yield_warning_threshold().await?,
            yield_critical_threshold: self.get_yield_critical_threshold().await?,
            locale: self.get_locale().await?,
            ..defaults
        };

        Ok(ConsoleConfig {
            latency_ms: self.get_latency_ms().await?,
            single_open_shift: self.get_single_open_shift().await?,
            metrics,
        })
    }
}
