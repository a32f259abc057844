//! CLI интерфейс для advisorydb
//!
//! Предоставляет командную строку для проверки конфигурации и
//! отладки выражений языка фильтров

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AdvisoryDB - сервис учета рекомендаций по безопасности
#[derive(Parser)]
#[command(name = "advisorydb")]
#[command(about = "AdvisoryDB - security advisory tracking service")]
#[command(version)]
pub struct Cli {
    /// Конфигурационный файл
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Уровень детализации логирования
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Проверить конфигурацию
    CheckConfig,

    /// Разобрать выражение фильтра и показать скомпилированный SQL
    CheckQuery {
        /// Выражение на языке фильтров
        query: String,

        /// Использовать схему рекомендаций
        #[arg(long)]
        advisories: bool,

        /// Проецируемые колонки (через пробел)
        #[arg(long, value_name = "COLUMNS")]
        columns: Option<String>,

        /// Поля сортировки, ведущий `-` — по убыванию
        #[arg(long, value_name = "ORDER")]
        order: Option<String>,
    },

    /// Показать информацию о сервисе
    Info,
}
