//! Общие типы и утилиты для advisorydb

pub mod config;
pub mod error;
pub mod types;

#[cfg(test)]
pub mod tests;

pub use config::*;
pub use error::{Error, FaultClass, Result};
pub use types::*;
