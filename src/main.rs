//! Главный исполняемый файл advisorydb

use advisorydb::cli::{Cli, Commands};
use advisorydb::common::Config;
use advisorydb::compiler::{create_query_sql, where_clause, AliasTable};
use advisorydb::query::parse;
use advisorydb::VERSION;
use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_tracing(&level)?;

    match &cli.command {
        Some(Commands::CheckConfig) => {
            config.validate().context("config validation")?;
            println!("Конфигурация корректна");
        }
        Some(Commands::CheckQuery {
            query,
            advisories,
            columns,
            order,
        }) => {
            check_query(query, *advisories, columns.as_deref(), order.as_deref())?;
        }
        Some(Commands::Info) => {
            println!("AdvisoryDB v{}", VERSION);
            println!("Состояний рабочего процесса: {}", config.workflow.states.len());
            println!("Переходов в таблице: {}", config.workflow.transitions.len());
        }
        None => {
            println!("AdvisoryDB v{}", VERSION);
            println!("Используйте --help для получения справки");
        }
    }

    Ok(())
}

/// Компилирует выражение фильтра и печатает результат
fn check_query(
    query: &str,
    advisories: bool,
    columns: Option<&str>,
    order: Option<&str>,
) -> anyhow::Result<()> {
    let expr = parse(query).context("parsing query")?;
    let aliases = AliasTable::for_advisories(advisories);
    let clause = where_clause(&expr, &aliases).context("compiling query")?;

    let fields: Vec<String> = columns
        .unwrap_or("id title tracking_id version publisher")
        .split_whitespace()
        .map(str::to_string)
        .collect();
    aliases
        .check_projections(&fields)
        .context("checking projections")?;

    let order_fields: Vec<String> = order
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let order_clause = aliases.create_order(&order_fields).context("parsing order")?;

    let sql = create_query_sql(&fields, &aliases, &clause, Some(&order_clause), None, None)?;
    println!("SQL: {}", sql);
    for (i, param) in clause.params.iter().enumerate() {
        println!("  ${} = {}", i + 1, param);
    }
    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing init: {}", e))?;
    Ok(())
}
