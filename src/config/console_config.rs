use serde::{Deserialize, Serialize};

/// 指标引擎参数
///
/// 默认值即控制台现行规则：容差 5%，告警 2 倍容差，严重 3 倍容差；
/// 收得率偏差 -5 告警、-10 严重；移动平均窗口 12；温度历史容量 24。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// 温度历史滑动窗口容量
    pub history_capacity: usize,

    /// 移动平均窗口（最近 N 个读数）
    pub moving_average_window: usize,

    /// 温度容差（相对目标温度的比例）
    pub temperature_tolerance_pct: f64,

    /// 温度告警倍数（diff > tolerance × N 触发告警）
    pub temperature_warning_factor: f64,

    /// 温度严重倍数（diff > tolerance × N 升级为 critical）
    pub temperature_critical_factor: f64,

    /// 收得率告警阈值（desvioMeta < 阈值）
    pub yield_warning_threshold: f64,

    /// 收得率严重阈值（desvioMeta < 阈值）
    pub yield_critical_threshold: f64,

    /// 温度计满量程（°C）
    pub gauge_scale: f64,

    /// 告警文案语言
    pub locale: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            history_capacity: 24,
            moving_average_window: 12,
            temperature_tolerance_pct: 0.05,
            temperature_warning_factor: 2.0,
            temperature_critical_factor: 3.0,
            yield_warning_threshold: -5.0,
            yield_critical_threshold: -10.0,
            gauge_scale: 1500.0,
            locale: "pt-BR".to_string(),
        }
    }
}

/// 控制台运行参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// 模拟响应延迟（毫秒）
    pub latency_ms: u64,

    /// 同一熔炉同时只允许一个进行中的班次
    pub single_open_shift: bool,

    pub metrics: MetricsConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            latency_ms: 300,
            single_open_shift: true,
            metrics: MetricsConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// 无延迟配置（测试/批处理）
    pub fn immediate() -> Self {
        Self {
            latency_ms: 0,
            ..Default::default()
        }
    }
}
