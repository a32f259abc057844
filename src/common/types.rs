//! Общие типы для advisorydb

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Метка конфиденциальности документа (Traffic Light Protocol)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tlp {
    /// Без ограничений распространения
    White,
    /// Распространение внутри сообщества
    Green,
    /// Распространение внутри организации
    Amber,
    /// Только для непосредственных получателей
    Red,
}

impl Tlp {
    /// Возвращает строковое представление метки
    pub fn as_str(&self) -> &'static str {
        match self {
            Tlp::White => "white",
            Tlp::Green => "green",
            Tlp::Amber => "amber",
            Tlp::Red => "red",
        }
    }
}

impl fmt::Display for Tlp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tlp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "white" => Ok(Tlp::White),
            "green" => Ok(Tlp::Green),
            "amber" => Ok(Tlp::Amber),
            "red" => Ok(Tlp::Red),
            _ => Err(format!("unknown TLP label: {}", s)),
        }
    }
}

/// Роль вызывающей стороны
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Редактор: ведет оценку рекомендаций
    Editor,
    /// Рецензент: подтверждает результат оценки
    Reviewer,
    /// Аудитор: только чтение журнала событий
    Auditor,
    /// Импортер: загружает документы
    Importer,
    /// Администратор
    Admin,
}

impl Role {
    /// Возвращает строковое представление роли
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Editor => "editor",
            Role::Reviewer => "reviewer",
            Role::Auditor => "auditor",
            Role::Importer => "importer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "editor" => Ok(Role::Editor),
            "reviewer" => Ok(Role::Reviewer),
            "auditor" => Ok(Role::Auditor),
            "importer" => Ok(Role::Importer),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {}", s)),
        }
    }
}

/// Состояние рабочего процесса рекомендации.
///
/// Набор состояний задается конфигурацией развертывания, поэтому
/// состояние хранится как непрозрачное имя; допустимость переходов
/// проверяется только по таблице переходов.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workflow(pub String);

impl Workflow {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Workflow {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
