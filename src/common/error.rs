//! Обработка ошибок для advisorydb

use thiserror::Error;

/// Основной тип ошибки для advisorydb
#[derive(Error, Debug)]
pub enum Error {
    /// Ошибка разбора выражения фильтра
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Поле отсутствует в списке разрешённых
    #[error("unknown field: {name}")]
    UnknownField { name: String },

    /// Документ уже есть в базе
    #[error("already in database")]
    AlreadyExists,

    /// Отказано в доступе (классификация или роль)
    #[error("access denied: {message}")]
    AccessDenied { message: String },

    /// Запрошенная строка не найдена
    #[error("not found")]
    NotFound,

    /// Переход между состояниями не предусмотрен таблицей
    #[error("state transition not possible: {from} -> {to}")]
    TransitionNotAllowed { from: String, to: String },

    /// Ошибка валидации входных данных
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Ошибка хранилища данных
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Ошибка конфигурации
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

/// Тип результата для advisorydb
pub type Result<T> = std::result::Result<T, Error>;

/// Класс сбоя для внешнего HTTP-слоя.
///
/// Детали серверных сбоев (текст запроса, параметры) наружу не отдаются,
/// они остаются в журнале.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    /// Некорректный ввод вызывающей стороны (400)
    BadInput,
    /// Запрещено политикой доступа (403)
    Forbidden,
    /// Конфликт с уже существующими данными (409)
    Conflict,
    /// Строка не найдена или вне области видимости (404)
    Missing,
    /// Внутренний сбой сервиса (500)
    Internal,
}

impl Error {
    /// Создает ошибку разбора выражения
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Создает ошибку неизвестного поля
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    /// Создает ошибку отказа в доступе
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    /// Создает ошибку недопустимого перехода
    pub fn transition_not_allowed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::TransitionNotAllowed {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Создает ошибку валидации
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Создает ошибку конфигурации
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Классифицирует ошибку для внешнего слоя
    pub fn fault(&self) -> FaultClass {
        match self {
            Error::Parse { .. }
            | Error::UnknownField { .. }
            | Error::TransitionNotAllowed { .. }
            | Error::Validation { .. } => FaultClass::BadInput,
            Error::AccessDenied { .. } => FaultClass::Forbidden,
            Error::AlreadyExists => FaultClass::Conflict,
            Error::NotFound => FaultClass::Missing,
            Error::Store(_) | Error::Configuration { .. } => FaultClass::Internal,
        }
    }
}
