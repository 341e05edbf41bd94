// ==========================================
// 熔炉运营控制台 - 熔炉领域模型
// ==========================================
// FurnaceRaw: 存储中的原始熔炉记录
// Furnace: 每次读取时派生的只读视图 (不持久化)
// ==========================================

use crate::domain::types::{AlertKind, FurnaceStatus, Severity};
use serde::{Deserialize, Serialize};

/// 温度历史默认容量 (滑动窗口)
pub const DEFAULT_HISTORY_CAPACITY: usize = 24;

// ==========================================
// FurnaceAlert - 熔炉告警
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnaceAlert {
    pub tipo: AlertKind,
    pub mensagem: String,
    pub severidade: Severity,
}

impl FurnaceAlert {
    pub fn new(tipo: AlertKind, mensagem: impl Into<String>, severidade: Severity) -> Self {
        Self {
            tipo,
            mensagem: mensagem.into(),
            severidade,
        }
    }
}

/// 配料条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureItem {
    pub nome: String,
    pub percentual: f64,
    pub cor: String,
}

/// 最近一次化验结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    pub data: String,
    pub aprovado: bool,
    pub cao: f64,
}

// ==========================================
// FurnaceRaw - 原始熔炉记录
// ==========================================
// 对齐: 控制台 fornos 数据集字段名 (camelCase)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnaceRaw {
    // ===== 标识 =====
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    // ===== 描述 =====
    pub nome: String,
    pub planta: String,
    pub tipo: String,
    pub capacidade: f64,
    pub status: FurnaceStatus,

    // ===== 温度 =====
    pub temperatura_atual: f64,
    pub temperatura_meta: f64,
    #[serde(default)]
    pub temperatura_historico: Vec<f64>, // 最近 24 个读数, 旧→新

    // ===== 收得率 =====
    #[serde(default)]
    pub rendimento_atual: f64,
    #[serde(default)]
    pub rendimento_meta: f64,

    // ===== 告警 (人工录入) =====
    #[serde(default)]
    pub alertas: Vec<FurnaceAlert>,

    // ===== 元数据 (引擎不计算) =====
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operador: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turno_atual: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo_operacao: Option<String>,
    #[serde(default)]
    pub mistura: Vec<MixtureItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultimo_laudo: Option<LabResult>,
}

impl FurnaceRaw {
    /// 记录新的当前温度并推入历史
    ///
    /// 历史长度超过 `capacity` 时淘汰最旧读数
    pub fn record_temperature(&mut self, value: f64, capacity: usize) {
        self.temperatura_atual = value;
        push_bounded(&mut self.temperatura_historico, value, capacity);
    }

    /// 历史截断到最近 `capacity` 个读数 (保留尾部)
    pub fn clamp_history(&mut self, capacity: usize) {
        let len = self.temperatura_historico.len();
        if len > capacity {
            self.temperatura_historico.drain(..len - capacity);
        }
    }

    pub fn has_alert_of(&self, tipo: AlertKind) -> bool {
        self.alertas.iter().any(|a| a.tipo == tipo)
    }
}

/// 追加读数到定长滑动窗口
pub fn push_bounded(history: &mut Vec<f64>, value: f64, capacity: usize) {
    history.push(value);
    if history.len() > capacity {
        let excess = history.len() - capacity;
        history.drain(..excess);
    }
}

// ==========================================
// NewFurnace - 新建熔炉请求
// ==========================================
// 默认目标值对齐控制台表单: 温度 1250, 收得率 90
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFurnace {
    pub nome: String,
    pub planta: String,
    pub tipo: String,
    pub capacidade: f64,
    pub status: FurnaceStatus,
    #[serde(default)]
    pub temperatura_atual: f64,
    #[serde(default = "default_temperatura_meta")]
    pub temperatura_meta: f64,
    #[serde(default = "default_rendimento_meta")]
    pub rendimento_meta: f64,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

fn default_temperatura_meta() -> f64 {
    1250.0
}

fn default_rendimento_meta() -> f64 {
    90.0
}

impl NewFurnace {
    /// 以给定ID生成原始记录 (历史为空)
    pub fn into_raw(self, id: String) -> FurnaceRaw {
        FurnaceRaw {
            id,
            tenant_id: self.tenant_id,
            nome: self.nome,
            planta: self.planta,
            tipo: self.tipo,
            capacidade: self.capacidade,
            status: self.status,
            temperatura_atual: self.temperatura_atual,
            temperatura_meta: self.temperatura_meta,
            temperatura_historico: Vec::new(),
            rendimento_atual: 0.0,
            rendimento_meta: self.rendimento_meta,
            alertas: Vec::new(),
            operador: None,
            turno_atual: None,
            tempo_operacao: None,
            mistura: Vec::new(),
            ultimo_laudo: None,
        }
    }
}

// ==========================================
// FurnacePatch - 熔炉部分更新
// ==========================================
// 温度历史由引擎维护, 不接受外部直接覆盖
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnacePatch {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub planta: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub capacidade: Option<f64>,
    #[serde(default)]
    pub status: Option<FurnaceStatus>,
    #[serde(default)]
    pub temperatura_atual: Option<f64>,
    #[serde(default)]
    pub temperatura_meta: Option<f64>,
    #[serde(default)]
    pub rendimento_atual: Option<f64>,
    #[serde(default)]
    pub rendimento_meta: Option<f64>,
    #[serde(default)]
    pub alertas: Option<Vec<FurnaceAlert>>,
    #[serde(default)]
    pub operador: Option<String>,
    #[serde(default)]
    pub turno_atual: Option<String>,
    #[serde(default)]
    pub tempo_operacao: Option<String>,
    #[serde(default)]
    pub mistura: Option<Vec<MixtureItem>>,
    #[serde(default)]
    pub ultimo_laudo: Option<LabResult>,
}

impl FurnacePatch {
    /// 仅更新当前温度
    pub fn temperature(value: f64) -> Self {
        Self {
            temperatura_atual: Some(value),
            ..Default::default()
        }
    }

    /// 合并到原始记录
    ///
    /// 包含 temperatura_atual 时同时推入温度历史
    pub fn apply_to(self, raw: &mut FurnaceRaw, history_capacity: usize) {
        if let Some(v) = self.nome {
            raw.nome = v;
        }
        if let Some(v) = self.planta {
            raw.planta = v;
        }
        if let Some(v) = self.tipo {
            raw.tipo = v;
        }
        if let Some(v) = self.capacidade {
            raw.capacidade = v;
        }
        if let Some(v) = self.status {
            raw.status = v;
        }
        if let Some(v) = self.temperatura_meta {
            raw.temperatura_meta = v;
        }
        if let Some(v) = self.rendimento_atual {
            raw.rendimento_atual = v;
        }
        if let Some(v) = self.rendimento_meta {
            raw.rendimento_meta = v;
        }
        if let Some(v) = self.alertas {
            raw.alertas = v;
        }
        if let Some(v) = self.operador {
            raw.operador = Some(v);
        }
        if let Some(v) = self.turno_atual {
            raw.turno_atual = Some(v);
        }
        if let Some(v) = self.tempo_operacao {
            raw.tempo_operacao = Some(v);
        }
        if let Some(v) = self.mistura {
            raw.mistura = v;
        }
        if let Some(v) = self.ultimo_laudo {
            raw.ultimo_laudo = Some(v);
        }
        if let Some(t) = self.temperatura_atual {
            raw.record_temperature(t, history_capacity);
        }
    }
}

// ==========================================
// Furnace - 派生视图
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Furnace {
    #[serde(flatten)]
    pub raw: FurnaceRaw,
    pub media_movel: f64,   // 最近 12 个读数的移动平均
    pub desvio_padrao: f64, // 历史标准差
    pub desvio_meta: f64,   // 收得率绝对偏差 (实际 - 目标)
}

impl Furnace {
    pub fn id(&self) -> &str {
        &self.raw.id
    }

    pub fn alertas(&self) -> &[FurnaceAlert] {
        &self.raw.alertas
    }

    pub fn alert_count(&self) -> usize {
        self.raw.alertas.len()
    }

    pub fn critical_alert_count(&self) -> usize {
        self.raw
            .alertas
            .iter()
            .filter(|a| a.severidade == Severity::Critical)
            .count()
    }
}
