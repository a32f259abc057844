//! Модели данных advisorydb

use crate::common::types::{Tlp, Workflow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(test)]
pub mod tests;

/// Импортированный документ.
///
/// После импорта документ неизменяем; удаление — отдельная операция.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub tracking_id: String,
    pub publisher: String,
    pub version: String,
    pub title: String,
    pub tlp: Tlp,
    pub current_release_date: Option<DateTime<Utc>>,
    pub initial_release_date: Option<DateTime<Utc>>,
    pub imported: DateTime<Utc>,
}

/// Рекомендация: состояние рабочего процесса поверх документа.
///
/// Ключ — пара (издатель, отслеживаемый идентификатор); метку
/// конфиденциальности рекомендация наследует от документа. Состояние
/// меняет только оркестратор переходов.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
    pub publisher: String,
    pub tracking_id: String,
    pub state: Workflow,
    pub tlp: Tlp,
}

/// Вид события журнала
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ImportDocument,
    DeleteDocument,
    StateChange,
}

impl EventKind {
    /// Строковое представление в журнале событий
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ImportDocument => "import_document",
            EventKind::DeleteDocument => "delete_document",
            EventKind::StateChange => "state_change",
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "import_document" => Ok(EventKind::ImportDocument),
            "delete_document" => Ok(EventKind::DeleteDocument),
            "state_change" => Ok(EventKind::StateChange),
            _ => Err(format!("unknown event kind: {}", s)),
        }
    }
}

/// Запись журнала событий, только добавляемая.
///
/// `actor` отсутствует при анонимизированном журналировании.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub event: EventKind,
    pub state: Workflow,
    pub actor: Option<String>,
    pub documents_id: i64,
    pub time: DateTime<Utc>,
}

/// Сохраненный именованный запрос
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuery {
    pub id: i64,
    /// Схема рекомендаций вместо схемы документов
    pub advisories: bool,
    pub definer: String,
    pub global: bool,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Текст фильтра на языке запросов
    pub query: String,
    /// Количество параметров параметризованного запроса
    pub num: i64,
    pub columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<String>>,
}
