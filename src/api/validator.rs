// ==========================================
// 熔炉运营控制台 - 表单输入校验
// ==========================================
// 职责: API 边界的输入校验 (对齐控制台表单规则)
// 说明: 引擎与台账不做校验, 非法输入在此拦截
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::furnace::{FurnacePatch, NewFurnace};
use crate::domain::shift::{NewShift, ShiftClosing};

/// 读数温度上限 (°C)
pub const MAX_READING_TEMPERATURE: f64 = 2000.0;

/// 最小产能
pub const MIN_CAPACITY: f64 = 1.0;

fn require_text(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!("{}不能为空", field)));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> ApiResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::ValidationError(format!(
            "{}必须为非负数: {}",
            field, value
        )));
    }
    Ok(())
}

fn require_capacity(value: f64) -> ApiResult<()> {
    if !value.is_finite() || value < MIN_CAPACITY {
        return Err(ApiError::ValidationError(format!(
            "capacidade必须不小于{}: {}",
            MIN_CAPACITY, value
        )));
    }
    Ok(())
}

// ==========================================
// 熔炉表单
// ==========================================

pub fn validate_new_furnace(new: &NewFurnace) -> ApiResult<()> {
    require_text("nome", &new.nome)?;
    require_text("planta", &new.planta)?;
    require_text("tipo", &new.tipo)?;
    require_capacity(new.capacidade)?;
    Ok(())
}

/// 部分更新: 只校验携带的字段
pub fn validate_furnace_patch(patch: &FurnacePatch) -> ApiResult<()> {
    if let Some(nome) = &patch.nome {
        require_text("nome", nome)?;
    }
    if let Some(planta) = &patch.planta {
        require_text("planta", planta)?;
    }
    if let Some(tipo) = &patch.tipo {
        require_text("tipo", tipo)?;
    }
    if let Some(capacidade) = patch.capacidade {
        require_capacity(capacidade)?;
    }
    Ok(())
}

// ==========================================
// 班次表单
// ==========================================

pub fn validate_new_shift(new: &NewShift) -> ApiResult<()> {
    require_text("fornoId", &new.forno_id)?;
    require_text("operador", &new.operador)?;
    require_non_negative("temperaturaInicio", new.temperatura_inicio)?;
    Ok(())
}

pub fn validate_reading(temperatura: f64) -> ApiResult<()> {
    if !temperatura.is_finite() || !(0.0..=MAX_READING_TEMPERATURE).contains(&temperatura) {
        return Err(ApiError::ValidationError(format!(
            "temperatura必须在0到{}之间: {}",
            MAX_READING_TEMPERATURE, temperatura
        )));
    }
    Ok(())
}

pub fn validate_closing(closing: &ShiftClosing) -> ApiResult<()> {
    if let Some(t) = closing.temperatura_fim {
        require_non_negative("temperaturaFim", t)?;
    }
    if let Some(p) = closing.producao {
        require_non_negative("producao", p)?;
    }
    if let Some(operador) = &closing.operador {
        require_text("operador", operador)?;
    }
    Ok(())
}
