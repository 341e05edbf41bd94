// ==========================================
// 熔炉运营控制台 - 班次台账
// ==========================================
// 状态机: aberto --(finish_shift)--> fechado, 不可逆
// 职责: 开班 / 录入读数 / 结班 / 班次与操作员统计
// 红线:
// - 读数只追加, 且只能追加到进行中的班次
// - 已结束班次的任何字段不再修改
// ==========================================

use crate::domain::shift::{
    sort_most_recent_first, NewShift, OperatorStats, ShiftClosing, ShiftReading, ShiftRecord,
    ShiftStats,
};
use crate::engine::clock::{truncate_to_minute, Clock, SystemClock};
use crate::engine::metrics::round1;
use crate::repository::error::RepositoryError;
use crate::repository::shift_repo::ShiftRepository;
use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

// ==========================================
// 错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum ShiftLedgerError {
    #[error("熔炉已有进行中的班次: forno_id={forno_id}, registro_id={registro_id}")]
    ShiftAlreadyOpen {
        forno_id: String,
        registro_id: String,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ShiftLedgerResult<T> = Result<T, ShiftLedgerError>;

// ==========================================
// ShiftLedger - 班次台账
// ==========================================
pub struct ShiftLedger {
    repo: Box<dyn ShiftRepository>,
    clock: Box<dyn Clock>,
    single_open_shift: bool,
}

impl ShiftLedger {
    /// 构造函数 (系统时钟, 启用单开班约束)
    pub fn new(repo: Box<dyn ShiftRepository>) -> Self {
        Self {
            repo,
            clock: Box::new(SystemClock),
            single_open_shift: true,
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_single_open_shift(mut self, enabled: bool) -> Self {
        self.single_open_shift = enabled;
        self
    }

    // ==========================================
    // 状态变更
    // ==========================================

    /// 开班
    ///
    /// # 返回
    /// 新建的进行中班次 (读数为空)
    ///
    /// # 错误
    /// - ShiftAlreadyOpen: 单开班约束开启且该熔炉已有进行中班次
    pub fn start_shift(&mut self, new: NewShift) -> ShiftLedgerResult<ShiftRecord> {
        if self.single_open_shift {
            if let Some(open) = self.open_for_forno(&new.forno_id)? {
                warn!(
                    forno_id = %new.forno_id,
                    registro_id = %open.id,
                    "拒绝开班: 已有进行中的班次"
                );
                return Err(ShiftLedgerError::ShiftAlreadyOpen {
                    forno_id: new.forno_id,
                    registro_id: open.id,
                });
            }
        }

        let record = new.into_record(Uuid::new_v4().to_string());
        self.repo.insert(&record)?;

        info!(
            registro_id = %record.id,
            forno_id = %record.forno_id,
            turno = %record.turno,
            operador = %record.operador,
            "班次已开始"
        );
        Ok(record)
    }

    /// 录入读数
    ///
    /// # 返回
    /// - Some(ShiftReading): 已追加
    /// - None: 班次不存在或已结束
    pub fn record_reading(
        &mut self,
        registro_id: &str,
        temperatura: f64,
        observacao: Option<String>,
    ) -> ShiftLedgerResult<Option<ShiftReading>> {
        let record = match self.repo.find_by_id(registro_id)? {
            Some(r) => r,
            None => {
                warn!(registro_id, "读数被忽略: 班次不存在");
                return Ok(None);
            }
        };

        if !record.is_open() {
            warn!(registro_id, "读数被忽略: 班次已结束");
            return Ok(None);
        }

        let reading = ShiftReading {
            id: Uuid::new_v4().to_string(),
            registro_id: record.id,
            hora: truncate_to_minute(self.clock.now()),
            temperatura,
            observacao,
        };

        if !self.repo.append_reading(&reading)? {
            return Ok(None);
        }

        debug!(registro_id, temperatura, hora = %reading.hora, "读数已录入");
        Ok(Some(reading))
    }

    /// 结班
    ///
    /// 合并结班字段并强制置为 fechado; 已结束的班次原样返回
    ///
    /// # 返回
    /// - None: 班次不存在
    pub fn finish_shift(
        &mut self,
        id: &str,
        closing: ShiftClosing,
    ) -> ShiftLedgerResult<Option<ShiftRecord>> {
        let mut record = match self.repo.find_by_id(id)? {
            Some(r) => r,
            None => return Ok(None),
        };

        if !record.is_open() {
            warn!(registro_id = id, "班次已结束, 忽略重复结班");
            return Ok(Some(record));
        }

        record.apply_closing(closing);
        if !self.repo.update(&record)? {
            return Ok(None);
        }

        info!(
            registro_id = id,
            forno_id = %record.forno_id,
            producao = ?record.producao,
            leituras = record.leituras.len(),
            "班次已结束"
        );
        Ok(Some(record))
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn find(&self, id: &str) -> ShiftLedgerResult<Option<ShiftRecord>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// 单班次温度统计
    ///
    /// 无读数时 media/min/max 取开班温度, total = 0
    pub fn shift_stats(&self, registro_id: &str) -> ShiftLedgerResult<Option<ShiftStats>> {
        let record = match self.repo.find_by_id(registro_id)? {
            Some(r) => r,
            None => return Ok(None),
        };

        if record.leituras.is_empty() {
            let t = record.temperatura_inicio;
            return Ok(Some(ShiftStats {
                media: t,
                min: t,
                max: t,
                total: 0,
            }));
        }

        let temps: Vec<f64> = record.leituras.iter().map(|l| l.temperatura).collect();
        let total = temps.len();
        let sum: f64 = temps.iter().sum();
        let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Some(ShiftStats {
            media: round1(sum / total as f64),
            min,
            max,
            total,
        }))
    }

    /// 熔炉班次历史 (最近在前)
    pub fn by_forno(&self, forno_id: &str) -> ShiftLedgerResult<Vec<ShiftRecord>> {
        let mut records = self.repo.find_by_forno(forno_id)?;
        sort_most_recent_first(&mut records);
        Ok(records)
    }

    /// 操作员班次历史 (最近在前, 姓名不区分大小写)
    pub fn by_operator(&self, nome: &str) -> ShiftLedgerResult<Vec<ShiftRecord>> {
        let mut records: Vec<ShiftRecord> = self
            .repo
            .find_all()?
            .into_iter()
            .filter(|r| r.operated_by(nome))
            .collect();
        sort_most_recent_first(&mut records);
        Ok(records)
    }

    /// 熔炉当前进行中的班次
    pub fn open_for_forno(&self, forno_id: &str) -> ShiftLedgerResult<Option<ShiftRecord>> {
        Ok(self
            .by_forno(forno_id)?
            .into_iter()
            .find(ShiftRecord::is_open))
    }

    /// 操作员当前进行中的班次
    pub fn active_for_operator(&self, nome: &str) -> ShiftLedgerResult<Option<ShiftRecord>> {
        Ok(self
            .by_operator(nome)?
            .into_iter()
            .find(ShiftRecord::is_open))
    }

    /// 操作员汇总统计
    ///
    /// 产量只统计已结束班次
    pub fn operator_stats(&self, nome: &str) -> ShiftLedgerResult<OperatorStats> {
        let records = self.by_operator(nome)?;

        let turnos_abertos = records.iter().filter(|r| r.is_open()).count();
        let fechados: Vec<&ShiftRecord> = records.iter().filter(|r| !r.is_open()).collect();
        let producao_total: f64 = fechados.iter().filter_map(|r| r.producao).sum();
        let producao_media = if fechados.is_empty() {
            0.0
        } else {
            round1(producao_total / fechados.len() as f64)
        };

        Ok(OperatorStats {
            total_turnos: records.len(),
            turnos_abertos,
            turnos_fechados: fechados.len(),
            producao_total,
            producao_media,
            ultimo_turno: records.first().cloned(),
        })
    }

    /// 班次已进行时长 ("Xh Ymin")
    pub fn elapsed(&self, record: &ShiftRecord) -> String {
        elapsed_since(record.data.and_time(record.hora_inicio), self.clock.now())
    }
}

/// 两个时间点之间的时长, 起点在未来时为 "0h 0min"
pub fn elapsed_since(start: NaiveDateTime, now: NaiveDateTime) -> String {
    let minutes = (now - start).num_minutes().max(0);
    format!("{}h {}min", minutes / 60, minutes % 60)
}
