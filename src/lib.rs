//! advisorydb - Сервис учета рекомендаций по безопасности на Rust
//!
//! Этот модуль предоставляет основную функциональность сервиса:
//! язык фильтров с компиляцией в параметризованный SQL, фильтрацию по
//! меткам конфиденциальности и управляемый таблицей переходов
//! жизненный цикл рекомендаций с журналом событий.

pub mod access;
pub mod cli;
pub mod common;
pub mod compiler;
pub mod models;
pub mod query;
pub mod store;
pub mod workflow;

pub use common::error::{Error, FaultClass, Result};
pub use common::types::*;

/// Версия библиотеки
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
