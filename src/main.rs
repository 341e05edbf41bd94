// ==========================================
// 熔炉运营控制台 - 命令行入口
// ==========================================
// 用法:
//   forno-ops --seed demos/seed.json            内存模式
//   forno-ops [--db <path>] [--seed <file>]     SQLite 模式 (库为空时写入种子)
// 输出: 车间汇总 + 熔炉卡片 + 进行中班次
// ==========================================

use anyhow::{bail, Context, Result};
use forno_ops::app::{get_default_db_path, AppState};
use forno_ops::config::ConsoleConfig;
use forno_ops::logging;
use forno_ops::repository::SeedData;
use tracing::info;

struct CliArgs {
    seed: Option<String>,
    db: Option<String>,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut cli = CliArgs {
        seed: None,
        db: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => cli.seed = Some(args.next().context("--seed 需要文件路径")?),
            "--db" => cli.db = Some(args.next().context("--db 需要数据库路径")?),
            other => bail!("未知参数: {}", other),
        }
    }
    Ok(cli)
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    info!("==================================================");
    info!("{} v{}", forno_ops::APP_NAME, forno_ops::VERSION);
    info!("==================================================");

    let cli = parse_args()?;
    let seed = cli
        .seed
        .as_deref()
        .map(SeedData::from_file)
        .transpose()
        .context("加载种子数据失败")?;

    let state = match (cli.db, seed) {
        (None, Some(seed)) => AppState::in_memory(seed, ConsoleConfig::default()),
        (db, seed) => {
            let db_path = db.unwrap_or_else(get_default_db_path);
            info!("使用数据库: {}", db_path);
            AppState::sqlite_seeded(&db_path, seed.as_ref())
                .await
                .context("无法初始化AppState")?
        }
    };

    let dashboard = state.dashboard();
    let summary = dashboard.fleet_summary().await?;
    info!(
        total = summary.total_fornos,
        ativos = summary.fornos_ativos,
        criticos = summary.alertas_criticos,
        alertas = summary.alertas_totais,
        "车间汇总"
    );

    for card in dashboard.furnace_cards().await? {
        let open = state.shift_api.get_open_shift(&card.id).await?;
        info!(
            forno = %card.nome,
            status = %card.status_label,
            temperatura = card.temperatura_atual,
            faixa = ?card.temperature_band,
            desvio = card.desvio_meta,
            alertas = card.alert_count,
            turno_aberto = open.as_ref().map(|r| r.operador.as_str()).unwrap_or("-"),
            "熔炉"
        );
    }

    Ok(())
}
