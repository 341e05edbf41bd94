// ==========================================
// 熔炉运营控制台 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一建表语句 (幂等), 供存储层与配置层共用
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 创建全部表（幂等）
///
/// 表:
/// - schema_version
/// - config_kv: 全局配置键值
/// - forno: 熔炉原始记录 (历史/告警/配料以 JSON 列存储)
/// - registro_turno / leitura_turno: 班次台账
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL DEFAULT 'global',
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS forno (
            id TEXT PRIMARY KEY,
            tenant_id TEXT,
            nome TEXT NOT NULL,
            planta TEXT NOT NULL,
            tipo TEXT NOT NULL,
            capacidade REAL NOT NULL,
            status TEXT NOT NULL,
            temperatura_atual REAL NOT NULL,
            temperatura_meta REAL NOT NULL,
            temperatura_historico_json TEXT NOT NULL DEFAULT '[]',
            rendimento_atual REAL NOT NULL DEFAULT 0,
            rendimento_meta REAL NOT NULL DEFAULT 0,
            alertas_json TEXT NOT NULL DEFAULT '[]',
            operador TEXT,
            turno_atual TEXT,
            tempo_operacao TEXT,
            mistura_json TEXT NOT NULL DEFAULT '[]',
            ultimo_laudo_json TEXT
        );

        CREATE TABLE IF NOT EXISTS registro_turno (
            id TEXT PRIMARY KEY,
            forno_id TEXT NOT NULL,
            data TEXT NOT NULL,
            turno TEXT NOT NULL,
            operador TEXT NOT NULL,
            hora_inicio TEXT NOT NULL,
            hora_fim TEXT,
            temperatura_inicio REAL NOT NULL,
            temperatura_fim REAL,
            producao REAL,
            observacoes TEXT,
            status TEXT NOT NULL,
            tenant_id TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_registro_turno_forno
            ON registro_turno(forno_id, status);

        CREATE TABLE IF NOT EXISTS leitura_turno (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            registro_id TEXT NOT NULL REFERENCES registro_turno(id) ON DELETE CASCADE,
            hora TEXT NOT NULL,
            temperatura REAL NOT NULL,
            observacao TEXT
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
