// ==========================================
// 熔炉运营控制台 - 领域类型定义
// ==========================================
// 序列化格式: 小写 (与控制台前端/存储一致)
// 数据库存储: to_db_str / from_db_str 成对使用
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 熔炉状态 (Furnace Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FurnaceStatus {
    Ativo,      // 运行中
    Inativo,    // 停用
    Manutencao, // 维护中
}

impl fmt::Display for FurnaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl FurnaceStatus {
    /// 从存储字符串解析
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ativo" => Some(FurnaceStatus::Ativo),
            "inativo" => Some(FurnaceStatus::Inativo),
            "manutencao" => Some(FurnaceStatus::Manutencao),
            _ => None,
        }
    }

    /// 转换为存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            FurnaceStatus::Ativo => "ativo",
            FurnaceStatus::Inativo => "inativo",
            FurnaceStatus::Manutencao => "manutencao",
        }
    }

    /// 控制台显示标签
    pub fn label(&self) -> &'static str {
        match self {
            FurnaceStatus::Ativo => "Operando",
            FurnaceStatus::Manutencao => "Manutenção",
            FurnaceStatus::Inativo => "Inativo",
        }
    }
}

// ==========================================
// 告警类型 (Alert Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Temperatura, // 温度
    Qualidade,   // 质量
    Rendimento,  // 收得率
    Manutencao,  // 维护
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl AlertKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AlertKind::Temperatura => "temperatura",
            AlertKind::Qualidade => "qualidade",
            AlertKind::Rendimento => "rendimento",
            AlertKind::Manutencao => "manutencao",
        }
    }
}

// ==========================================
// 告警严重度 (Severity)
// ==========================================
// 顺序: Info < Warning < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

// ==========================================
// 班次代码 (Shift Code)
// ==========================================
// A: 06:00-14:00, B: 14:00-22:00, C: 22:00-06:00
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftCode {
    A,
    B,
    C,
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ShiftCode {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" => Some(ShiftCode::A),
            "B" => Some(ShiftCode::B),
            "C" => Some(ShiftCode::C),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShiftCode::A => "A",
            ShiftCode::B => "B",
            ShiftCode::C => "C",
        }
    }

    /// 班次时间窗标签
    pub fn window_label(&self) -> &'static str {
        match self {
            ShiftCode::A => "Turno A (06:00 - 14:00)",
            ShiftCode::B => "Turno B (14:00 - 22:00)",
            ShiftCode::C => "Turno C (22:00 - 06:00)",
        }
    }
}

// ==========================================
// 班次记录状态 (Shift Status)
// ==========================================
// 状态机: Aberto → Fechado (不可逆)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    Aberto,  // 进行中
    Fechado, // 已结束
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ShiftStatus {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "aberto" => Some(ShiftStatus::Aberto),
            "fechado" => Some(ShiftStatus::Fechado),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShiftStatus::Aberto => "aberto",
            ShiftStatus::Fechado => "fechado",
        }
    }
}

// ==========================================
// 温度带 (Temperature Band)
// ==========================================
// 依据控制台卡片配色: 绿 / 黄 / 红
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    Ok,      // diff ≤ tolerance
    Atencao, // diff ≤ 2 × tolerance
    Critico, // 其余
}

impl TemperatureBand {
    /// 控制台卡片颜色
    pub fn color(&self) -> &'static str {
        match self {
            TemperatureBand::Ok => "#22c55e",
            TemperatureBand::Atencao => "#eab308",
            TemperatureBand::Critico => "#ef4444",
        }
    }
}

// ==========================================
// 收得率偏差带 (Deviation Band)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationBand {
    Ok,       // |d| ≤ 2
    Warning,  // |d| ≤ 5
    Critical, // 其余
}

impl fmt::Display for DeviationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviationBand::Ok => write!(f, "desvio-ok"),
            DeviationBand::Warning => write!(f, "desvio-warning"),
            DeviationBand::Critical => write!(f, "desvio-critical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_furnace_status_db_round_trip() {
        for status in [FurnaceStatus::Ativo, FurnaceStatus::Inativo, FurnaceStatus::Manutencao] {
            assert_eq!(FurnaceStatus::from_db_str(status.to_db_str()), Some(status));
        }
        assert_eq!(FurnaceStatus::from_db_str("ATIVO"), Some(FurnaceStatus::Ativo));
        assert_eq!(FurnaceStatus::from_db_str("desligado"), None);
    }

    #[test]
    fn test_serde_wire_names() {
        assert_eq!(serde_json::to_string(&FurnaceStatus::Manutencao).unwrap(), "\"manutencao\"");
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
        assert_eq!(serde_json::to_string(&ShiftCode::B).unwrap(), "\"B\"");
        let status: ShiftStatus = serde_json::from_str("\"fechado\"").unwrap();
        assert_eq!(status, ShiftStatus::Fechado);
    }

    #[test]
    fn test_shift_window_label() {
        assert_eq!(ShiftCode::C.window_label(), "Turno C (22:00 - 06:00)");
        assert_eq!(ShiftCode::from_db_str("b"), Some(ShiftCode::B));
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_status_label() {
        assert_eq!(FurnaceStatus::Ativo.label(), "Operando");
        assert_eq!(FurnaceStatus::Manutencao.label(), "Manutenção");
    }
}
