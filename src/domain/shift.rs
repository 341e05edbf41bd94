// ==========================================
// 熔炉运营控制台 - 班次台账领域模型
// ==========================================
// ShiftRecord (RegistroTurno): 班次记录
// ShiftReading (LeituraTurno): 班次内温度读数
// 状态机: aberto → fechado (不可逆)
// ==========================================

use crate::domain::types::{ShiftCode, ShiftStatus};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

// ==========================================
// ShiftReading - 班次读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftReading {
    pub id: String,
    pub registro_id: String,
    pub hora: NaiveDateTime, // 精确到分钟
    pub temperatura: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacao: Option<String>,
}

// ==========================================
// ShiftRecord - 班次记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    pub id: String,
    pub forno_id: String, // 非拥有引用
    pub data: NaiveDate,
    pub turno: ShiftCode,
    pub operador: String,
    #[serde(with = "hhmm")]
    pub hora_inicio: NaiveTime,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub hora_fim: Option<NaiveTime>,
    pub temperatura_inicio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperatura_fim: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producao: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    pub status: ShiftStatus,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub leituras: Vec<ShiftReading>,
}

impl ShiftRecord {
    pub fn is_open(&self) -> bool {
        self.status == ShiftStatus::Aberto
    }

    /// 排序键: (data, horaInicio), 越大越新
    pub fn recency_key(&self) -> (NaiveDate, NaiveTime) {
        (self.data, self.hora_inicio)
    }

    pub fn operated_by(&self, nome: &str) -> bool {
        self.operador.trim().to_lowercase() == nome.trim().to_lowercase()
    }

    /// 合并结班字段并强制关闭
    ///
    /// closing 中携带的 status 被忽略
    pub fn apply_closing(&mut self, closing: ShiftClosing) {
        if let Some(v) = closing.operador {
            self.operador = v;
        }
        if let Some(v) = closing.hora_fim {
            self.hora_fim = Some(v);
        }
        if let Some(v) = closing.temperatura_fim {
            self.temperatura_fim = Some(v);
        }
        if let Some(v) = closing.producao {
            self.producao = Some(v);
        }
        if let Some(v) = closing.observacoes {
            self.observacoes = Some(v);
        }
        self.status = ShiftStatus::Fechado;
    }
}

/// 按 (data, horaInicio) 倒序排列, 最近的班次在前
pub fn sort_most_recent_first(records: &mut [ShiftRecord]) {
    records.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));
}

// ==========================================
// NewShift - 开班请求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShift {
    pub forno_id: String,
    pub data: NaiveDate,
    pub turno: ShiftCode,
    pub operador: String,
    #[serde(with = "hhmm")]
    pub hora_inicio: NaiveTime,
    pub temperatura_inicio: f64,
    #[serde(default)]
    pub observacoes: Option<String>,
    pub tenant_id: String,
}

impl NewShift {
    pub fn into_record(self, id: String) -> ShiftRecord {
        ShiftRecord {
            id,
            forno_id: self.forno_id,
            data: self.data,
            turno: self.turno,
            operador: self.operador,
            hora_inicio: self.hora_inicio,
            hora_fim: None,
            temperatura_inicio: self.temperatura_inicio,
            temperatura_fim: None,
            producao: None,
            observacoes: self.observacoes,
            status: ShiftStatus::Aberto,
            tenant_id: self.tenant_id,
            leituras: Vec::new(),
        }
    }
}

// ==========================================
// ShiftClosing - 结班字段 (部分更新)
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftClosing {
    #[serde(default, with = "hhmm_opt")]
    pub hora_fim: Option<NaiveTime>,
    #[serde(default)]
    pub temperatura_fim: Option<f64>,
    #[serde(default)]
    pub producao: Option<f64>,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub operador: Option<String>,
    #[serde(default)]
    pub status: Option<ShiftStatus>,
}

// ==========================================
// 统计结果
// ==========================================

/// 单班次温度统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftStats {
    pub media: f64,
    pub min: f64,
    pub max: f64,
    pub total: usize,
}

/// 操作员汇总统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorStats {
    pub total_turnos: usize,
    pub turnos_abertos: usize,
    pub turnos_fechados: usize,
    pub producao_total: f64,  // 仅统计已结束班次
    pub producao_media: f64,  // 仅统计已结束班次
    pub ultimo_turno: Option<ShiftRecord>,
}

// ==========================================
// HH:MM 序列化
// ==========================================
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// 兼容 HH:MM 与 HH:MM:SS
    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    }
}

pub(crate) mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.serialize_str(&t.format(super::hhmm::FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw {
            Some(s) if !s.trim().is_empty() => super::hhmm::parse(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
