// ==========================================
// 熔炉运营控制台 - 指标公式
// ==========================================
// 职责: 移动平均 / 标准差 / 目标偏差
// 约束: 纯函数, 不抛错, 缺失或非法数据一律降级为 0
// 精度: 统一四舍五入到 0.1 (半数向上)
// ==========================================

/// 四舍五入到一位小数 (round-half-up)
pub fn round1(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// 传感器有效读数: 非正值视为缺测
fn valid_readings(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| *v > 0.0).collect()
}

/// 移动平均
///
/// # 规则
/// - 给定 `window` 时只取最后 window 个读数
/// - 丢弃 ≤ 0 的读数, 无有效读数 → 0
pub fn moving_average(values: &[f64], window: Option<usize>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let slice = match window {
        Some(w) if w < values.len() => &values[values.len() - w..],
        _ => values,
    };

    let valid = valid_readings(slice);
    if valid.is_empty() {
        return 0.0;
    }

    let sum: f64 = valid.iter().sum();
    round1(sum / valid.len() as f64)
}

/// 总体标准差
///
/// 有效读数少于 2 个时返回 0
pub fn standard_deviation(values: &[f64]) -> f64 {
    let valid = valid_readings(values);
    if valid.len() < 2 {
        return 0.0;
    }

    let n = valid.len() as f64;
    let mean = valid.iter().sum::<f64>() / n;
    let variance = valid.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    round1(variance.sqrt())
}

/// 相对目标的百分比偏差 (带符号)
pub fn deviation_from_target(actual: f64, target: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    round1((actual - target) / target * 100.0)
}

/// 绝对偏差 (实际 - 目标), 用于收得率
pub fn absolute_deviation(actual: f64, target: f64) -> f64 {
    round1(actual - target)
}

/// 温度计百分比 (封顶 100)
pub fn gauge_percentage(value: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return 0.0;
    }
    (value / scale * 100.0).min(100.0)
}
