//! Конфигурация для advisorydb
//!
//! Предоставляет структуры конфигурации для различных компонентов сервиса

use crate::common::error::{Error, Result};
use crate::common::types::{Role, Workflow};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Общие настройки сервиса
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Не записывать имя пользователя в журнал событий
    pub anonymous_event_logging: bool,
    /// Максимальный размер загружаемого документа (в байтах)
    pub advisory_upload_limit: usize,
    /// Колонки списка по умолчанию
    pub default_columns: Vec<String>,
    /// Порядок сортировки по умолчанию (`-` = по убыванию)
    pub default_order: Vec<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            anonymous_event_logging: false,
            advisory_upload_limit: 50 * 1024 * 1024,
            default_columns: vec![
                "id".to_string(),
                "title".to_string(),
                "tracking_id".to_string(),
                "version".to_string(),
                "publisher".to_string(),
            ],
            default_order: vec![
                "publisher".to_string(),
                "tracking_id".to_string(),
                "-version".to_string(),
            ],
        }
    }
}

/// Конфигурация подключения к базе данных
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Строка подключения
    pub url: String,
    /// Максимальное количество подключений в пуле
    pub max_connections: u32,
    /// Таймаут подключения (в секундах)
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://advisorydb@localhost/advisorydb".to_string(),
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

/// Конфигурация логирования
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Уровень логирования
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Ребро таблицы переходов: из какого состояния в какое и кому можно
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRule {
    pub from: Workflow,
    pub to: Workflow,
    pub roles: Vec<Role>,
}

/// Конфигурация рабочего процесса рекомендаций.
///
/// Набор состояний и ребер задается развертыванием; движок переходов
/// не содержит встроенных состояний.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Все допустимые состояния
    pub states: Vec<Workflow>,
    /// Состояние, в котором создается импортированная рекомендация
    pub initial_state: Workflow,
    /// Допустимые переходы
    pub transitions: Vec<TransitionRule>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        fn w(name: &str) -> Workflow {
            Workflow::from(name)
        }
        Self {
            states: ["new", "read", "assessing", "review", "archived", "deleted"]
                .into_iter()
                .map(w)
                .collect(),
            initial_state: w("new"),
            transitions: vec![
                TransitionRule {
                    from: w("new"),
                    to: w("read"),
                    roles: vec![Role::Editor],
                },
                TransitionRule {
                    from: w("read"),
                    to: w("new"),
                    roles: vec![Role::Editor],
                },
                TransitionRule {
                    from: w("read"),
                    to: w("assessing"),
                    roles: vec![Role::Editor],
                },
                TransitionRule {
                    from: w("assessing"),
                    to: w("read"),
                    roles: vec![Role::Editor],
                },
                TransitionRule {
                    from: w("assessing"),
                    to: w("review"),
                    roles: vec![Role::Editor],
                },
                TransitionRule {
                    from: w("review"),
                    to: w("assessing"),
                    roles: vec![Role::Reviewer],
                },
                TransitionRule {
                    from: w("review"),
                    to: w("archived"),
                    roles: vec![Role::Reviewer],
                },
                TransitionRule {
                    from: w("archived"),
                    to: w("review"),
                    roles: vec![Role::Admin],
                },
                TransitionRule {
                    from: w("archived"),
                    to: w("deleted"),
                    roles: vec![Role::Admin],
                },
                TransitionRule {
                    from: w("review"),
                    to: w("deleted"),
                    roles: vec![Role::Admin],
                },
            ],
        }
    }
}

/// Полная конфигурация сервиса
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub workflow: WorkflowConfig,
}

impl Config {
    /// Загружает конфигурацию из TOML файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::configuration(format!(
                "cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&text)
            .map_err(|e| Error::configuration(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Проверяет согласованность конфигурации
    pub fn validate(&self) -> Result<()> {
        let wf = &self.workflow;
        if !wf.states.contains(&wf.initial_state) {
            return Err(Error::configuration(format!(
                "initial state '{}' is not in the state set",
                wf.initial_state
            )));
        }
        for rule in &wf.transitions {
            for state in [&rule.from, &rule.to] {
                if !wf.states.contains(state) {
                    return Err(Error::configuration(format!(
                        "transition references unknown state '{}'",
                        state
                    )));
                }
            }
            if rule.roles.is_empty() {
                return Err(Error::configuration(format!(
                    "transition {} -> {} has no roles",
                    rule.from, rule.to
                )));
            }
        }
        if self.database.max_connections == 0 {
            return Err(Error::configuration("max_connections must be positive"));
        }
        Ok(())
    }
}
