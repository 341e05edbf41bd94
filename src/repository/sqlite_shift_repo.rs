// ==========================================
// 熔炉运营控制台 - 班次台账 SQLite 仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 存储: registro_turno (表头) + leitura_turno (读数, 按 seq 保序)
// ==========================================

use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::domain::shift::{ShiftReading, ShiftRecord};
use crate::domain::types::{ShiftCode, ShiftStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::shift_repo::ShiftRepository;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_COLUMNS: &str = r#"
    id, forno_id, data, turno, operador, hora_inicio, hora_fim,
    temperatura_inicio, temperatura_fim, producao, observacoes, status, tenant_id
"#;

// ==========================================
// SqliteShiftRepository - 班次 SQLite 仓储
// ==========================================
pub struct SqliteShiftRepository {
    conn: Connection,
}

impl SqliteShiftRepository {
    /// 打开数据库并确保表结构存在
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Connection) -> RepositoryResult<Self> {
        configure_sqlite_connection(&conn)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// 按条件查询表头并补全读数
    fn query_records(
        &self,
        where_clause: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> RepositoryResult<Vec<ShiftRecord>> {
        let sql = format!(
            "SELECT {} FROM registro_turno {} ORDER BY rowid",
            SELECT_COLUMNS, where_clause
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(args, ShiftRow::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            let mut record = row?.into_domain()?;
            record.leituras = self.load_readings(&record.id)?;
            records.push(record);
        }
        Ok(records)
    }

    /// 读取某班次的读数（按追加顺序）
    fn load_readings(&self, registro_id: &str) -> RepositoryResult<Vec<ShiftReading>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, registro_id, hora, temperatura, observacao
            FROM leitura_turno
            WHERE registro_id = ?1
            ORDER BY seq
            "#,
        )?;

        let rows = stmt.query_map(params![registro_id], |row| {
            Ok(ShiftReading {
                id: row.get(0)?,
                registro_id: row.get(1)?,
                hora: row.get::<_, NaiveDateTime>(2)?,
                temperatura: row.get(3)?,
                observacao: row.get(4)?,
            })
        })?;

        let mut readings = Vec::new();
        for row in rows {
            readings.push(row?);
        }
        Ok(readings)
    }

    fn record_exists(&self, id: &str) -> RepositoryResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM registro_turno WHERE id = ?1",
                params![id],
                |_row| Ok(true),
            )
            .optional()?;
        Ok(found.unwrap_or(false))
    }
}

impl ShiftRepository for SqliteShiftRepository {
    fn find_all(&self) -> RepositoryResult<Vec<ShiftRecord>> {
        self.query_records("", &[])
    }

    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<ShiftRecord>> {
        let mut records = self.query_records("WHERE id = ?1", &[&id])?;
        Ok(records.pop())
    }

    fn find_by_forno(&self, forno_id: &str) -> RepositoryResult<Vec<ShiftRecord>> {
        self.query_records("WHERE forno_id = ?1", &[&forno_id])
    }

    fn insert(&mut self, record: &ShiftRecord) -> RepositoryResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO registro_turno (
                id, forno_id, data, turno, operador, hora_inicio, hora_fim,
                temperatura_inicio, temperatura_fim, producao, observacoes, status, tenant_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                record.id,
                record.forno_id,
                record.data,
                record.turno.to_db_str(),
                record.operador,
                record.hora_inicio,
                record.hora_fim,
                record.temperatura_inicio,
                record.temperatura_fim,
                record.producao,
                record.observacoes,
                record.status.to_db_str(),
                record.tenant_id,
            ],
        )?;

        for reading in &record.leituras {
            tx.execute(
                r#"
                INSERT INTO leitura_turno (id, registro_id, hora, temperatura, observacao)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    reading.id,
                    record.id,
                    reading.hora,
                    reading.temperatura,
                    reading.observacao,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn update(&mut self, record: &ShiftRecord) -> RepositoryResult<bool> {
        let affected = self.conn.execute(
            r#"
            UPDATE registro_turno SET
                forno_id = ?2, data = ?3, turno = ?4, operador = ?5,
                hora_inicio = ?6, hora_fim = ?7,
                temperatura_inicio = ?8, temperatura_fim = ?9, producao = ?10,
                observacoes = ?11, status = ?12, tenant_id = ?13
            WHERE id = ?1
            "#,
            params![
                record.id,
                record.forno_id,
                record.data,
                record.turno.to_db_str(),
                record.operador,
                record.hora_inicio,
                record.hora_fim,
                record.temperatura_inicio,
                record.temperatura_fim,
                record.producao,
                record.observacoes,
                record.status.to_db_str(),
                record.tenant_id,
            ],
        )?;
        Ok(affected > 0)
    }

    fn append_reading(&mut self, reading: &ShiftReading) -> RepositoryResult<bool> {
        if !self.record_exists(&reading.registro_id)? {
            return Ok(false);
        }

        self.conn.execute(
            r#"
            INSERT INTO leitura_turno (id, registro_id, hora, temperatura, observacao)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                reading.id,
                reading.registro_id,
                reading.hora,
                reading.temperatura,
                reading.observacao,
            ],
        )?;
        Ok(true)
    }
}

// ==========================================
// 行映射
// ==========================================
struct ShiftRow {
    id: String,
    forno_id: String,
    data: NaiveDate,
    turno: String,
    operador: String,
    hora_inicio: NaiveTime,
    hora_fim: Option<NaiveTime>,
    temperatura_inicio: f64,
    temperatura_fim: Option<f64>,
    producao: Option<f64>,
    observacoes: Option<String>,
    status: String,
    tenant_id: String,
}

impl ShiftRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            forno_id: row.get(1)?,
            data: row.get(2)?,
            turno: row.get(3)?,
            operador: row.get(4)?,
            hora_inicio: row.get(5)?,
            hora_fim: row.get(6)?,
            temperatura_inicio: row.get(7)?,
            temperatura_fim: row.get(8)?,
            producao: row.get(9)?,
            observacoes: row.get(10)?,
            status: row.get(11)?,
            tenant_id: row.get(12)?,
        })
    }

    fn into_domain(self) -> RepositoryResult<ShiftRecord> {
        let turno = ShiftCode::from_db_str(&self.turno)
            .ok_or_else(|| RepositoryError::field("turno", format!("未知班次: {}", self.turno)))?;
        let status = ShiftStatus::from_db_str(&self.status).ok_or_else(|| {
            RepositoryError::field("status", format!("未知班次状态: {}", self.status))
        })?;

        Ok(ShiftRecord {
            id: self.id,
            forno_id: self.forno_id,
            data: self.data,
            turno,
            operador: self.operador,
            hora_inicio: self.hora_inicio,
            hora_fim: self.hora_fim,
            temperatura_inicio: self.temperatura_inicio,
            temperatura_fim: self.temperatura_fim,
            producao: self.producao,
            observacoes: self.observacoes,
            status,
            tenant_id: self.tenant_id,
            leituras: Vec::new(),
        })
    }
}
