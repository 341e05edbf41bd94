// ==========================================
// 熔炉运营控制台 - 熔炉 SQLite 仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 存储: forno 表, 历史/告警/配料/化验以 JSON 列存储
// ==========================================

use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::domain::furnace::{FurnaceAlert, FurnaceRaw, LabResult, MixtureItem};
use crate::domain::types::FurnaceStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::furnace_repo::FurnaceRepository;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_COLUMNS: &str = r#"
    id, tenant_id, nome, planta, tipo, capacidade, status,
    temperatura_atual, temperatura_meta, temperatura_historico_json,
    rendimento_atual, rendimento_meta, alertas_json,
    operador, turno_atual, tempo_operacao, mistura_json, ultimo_laudo_json
"#;

// ==========================================
// SqliteFurnaceRepository - 熔炉 SQLite 仓储
// ==========================================
/// 熔炉 SQLite 仓储
///
/// 独占一个连接; 单写者模型下不需要 Mutex
pub struct SqliteFurnaceRepository {
    conn: Connection,
}

impl SqliteFurnaceRepository {
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
}

impl FurnaceRepository for SqliteFurnaceRepository {
    fn find_all(&self) -> RepositoryResult<Vec<FurnaceRaw>> {
        let sql = format!("SELECT {} FROM forno ORDER BY rowid", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], FurnaceRow::from_row)?;

        let mut furnaces = Vec::new();
        for row in rows {
            furnaces.push(row?.into_domain()?);
        }
        Ok(furnaces)
    }

    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<FurnaceRaw>> {
        let sql = format!("SELECT {} FROM forno WHERE id = ?1", SELECT_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![id], FurnaceRow::from_row)
            .optional()?;

        row.map(FurnaceRow::into_domain).transpose()
    }

    fn insert(&mut self, raw: &FurnaceRaw) -> RepositoryResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO forno (
                id, tenant_id, nome, planta, tipo, capacidade, status,
                temperatura_atual, temperatura_meta, temperatura_historico_json,
                rendimento_atual, rendimento_meta, alertas_json,
                operador, turno_atual, tempo_operacao, mistura_json, ultimo_laudo_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
            "#,
            params![
                raw.id,
                raw.tenant_id,
                raw.nome,
                raw.planta,
                raw.tipo,
                raw.capacidade,
                raw.status.to_db_str(),
                raw.temperatura_atual,
                raw.temperatura_meta,
                serde_json::to_string(&raw.temperatura_historico)?,
                raw.rendimento_atual,
                raw.rendimento_meta,
                serde_json::to_string(&raw.alertas)?,
                raw.operador,
                raw.turno_atual,
                raw.tempo_operacao,
                serde_json::to_string(&raw.mistura)?,
                raw.ultimo_laudo.as_ref().map(serde_json::to_string).transpose()?,
            ],
        )?;
        Ok(())
    }

    fn update(&mut self, raw: &FurnaceRaw) -> RepositoryResult<bool> {
        let affected = self.conn.execute(
            r#"
            UPDATE forno SET
                tenant_id = ?2, nome = ?3, planta = ?4, tipo = ?5, capacidade = ?6, status = ?7,
                temperatura_atual = ?8, temperatura_meta = ?9, temperatura_historico_json = ?10,
                rendimento_atual = ?11, rendimento_meta = ?12, alertas_json = ?13,
                operador = ?14, turno_atual = ?15, tempo_operacao = ?16,
                mistura_json = ?17, ultimo_laudo_json = ?18
            WHERE id = ?1
            "#,
            params![
                raw.id,
                raw.tenant_id,
                raw.nome,
                raw.planta,
                raw.tipo,
                raw.capacidade,
                raw.status.to_db_str(),
                raw.temperatura_atual,
                raw.temperatura_meta,
                serde_json::to_string(&raw.temperatura_historico)?,
                raw.rendimento_atual,
                raw.rendimento_meta,
                serde_json::to_string(&raw.alertas)?,
                raw.operador,
                raw.turno_atual,
                raw.tempo_operacao,
                serde_json::to_string(&raw.mistura)?,
                raw.ultimo_laudo.as_ref().map(serde_json::to_string).transpose()?,
            ],
        )?;
        Ok(affected > 0)
    }

    fn delete(&mut self, id: &str) -> RepositoryResult<bool> {
        let affected = self.conn.execute("DELETE FROM forno WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}

// ==========================================
// 行映射
// ==========================================
struct FurnaceRow {
    id: String,
    tenant_id: Option<String>,
    nome: String,
    planta: String,
    tipo: String,
    capacidade: f64,
    status: String,
    temperatura_atual: f64,
    temperatura_meta: f64,
    historico_json: String,
    rendimento_atual: f64,
    rendimento_meta: f64,
    alertas_json: String,
    operador: Option<String>,
    turno_atual: Option<String>,
    tempo_operacao: Option<String>,
    mistura_json: String,
    ultimo_laudo_json: Option<String>,
}

impl FurnaceRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            tenant_id: row.get(1)?,
            nome: row.get(2)?,
            planta: row.get(3)?,
            tipo: row.get(4)?,
            capacidade: row.get(5)?,
            status: row.get(6)?,
            temperatura_atual: row.get(7)?,
            temperatura_meta: row.get(8)?,
            historico_json: row.get(9)?,
            rendimento_atual: row.get(10)?,
            rendimento_meta: row.get(11)?,
            alertas_json: row.get(12)?,
            operador: row.get(13)?,
            turno_atual: row.get(14)?,
            tempo_operacao: row.get(15)?,
            mistura_json: row.get(16)?,
            ultimo_laudo_json: row.get(17)?,
        })
    }

    fn into_domain(self) -> RepositoryResult<FurnaceRaw> {
        let status = FurnaceStatus::from_db_str(&self.status).ok_or_else(|| {
            RepositoryError::field("status", format!("未知熔炉状态: {}", self.status))
        })?;
        let temperatura_historico: Vec<f64> = serde_json::from_str(&self.historico_json)?;
        let alertas: Vec<FurnaceAlert> = serde_json::from_str(&self.alertas_json)?;
        let mistura: Vec<MixtureItem> = serde_json::from_str(&self.mistura_json)?;
        let ultimo_laudo: Option<LabResult> = self
            .ultimo_laudo_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(FurnaceRaw {
            id: self.id,
            tenant_id: self.tenant_id,
            nome: self.nome,
            planta: self.planta,
            tipo: self.tipo,
            capacidade: self.capacidade,
            status,
            temperatura_atual: self.temperatura_atual,
            temperatura_meta: self.temperatura_meta,
            temperatura_historico,
            rendimento_atual: self.rendimento_atual,
            rendimento_meta: self.rendimento_meta,
            alertas,
            operador: self.operador,
            turno_atual: self.turno_atual,
            tempo_operacao: self.tempo_operacao,
            mistura,
            ultimo_laudo,
        })
    }
}
