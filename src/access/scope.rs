//! Область видимости по меткам конфиденциальности
//!
//! Разрешения вызывающей стороны превращаются в текст на том же языке
//! фильтров, что и пользовательские запросы, поэтому фильтр
//! конфиденциальности проходит через тот же лексер, парсер и
//! компилятор и навешивается поверх запроса обычным `and`.

use crate::common::types::Tlp;
use serde::{Deserialize, Serialize};

/// Запись области видимости: издатель и допустимые для него метки.
///
/// `publisher` со значением `None` относится к любому издателю.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherTlps {
    pub publisher: Option<String>,
    pub tlps: Vec<Tlp>,
}

/// Набор разрешений вызывающей стороны.
///
/// Пустой набор означает отсутствие ограничений: фильтр не
/// навешивается вовсе.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TlpScope(pub Vec<PublisherTlps>);

impl TlpScope {
    pub fn new(entries: Vec<PublisherTlps>) -> Self {
        Self(entries)
    }

    /// Проверяет, пуст ли набор разрешений
    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    /// Точечная проверка: видна ли вызывающему пара издатель/метка
    pub fn allowed(&self, publisher: &str, tlp: Tlp) -> bool {
        self.0.iter().any(|entry| {
            entry
                .publisher
                .as_deref()
                .map_or(true, |p| p == publisher)
                && entry.tlps.contains(&tlp)
        })
    }

    /// Текст условия на языке фильтров.
    ///
    /// Записи набора соединяются через `or`; запись с издателем
    /// ограничивает свои метки этим издателем через `and`. Пустой
    /// набор дает `true` (без ограничений), набор без единой метки —
    /// `false` (не видно ничего).
    pub fn as_conditions(&self) -> String {
        if self.is_unrestricted() {
            return "true".to_string();
        }
        let entries: Vec<String> = self
            .0
            .iter()
            .filter(|entry| !entry.tlps.is_empty())
            .map(|entry| {
                let tlps = or_fold(
                    entry
                        .tlps
                        .iter()
                        .map(|tlp| format!("$tlp {} tlp =", tlp))
                        .collect(),
                );
                match &entry.publisher {
                    Some(publisher) => {
                        format!("$publisher {} string = {} and", quote(publisher), tlps)
                    }
                    None => tlps,
                }
            })
            .collect();
        if entries.is_empty() {
            return "false".to_string();
        }
        or_fold(entries)
    }
}

/// Сворачивает условия в ИЛИ-цепочку обратной польской записи
fn or_fold(conditions: Vec<String>) -> String {
    let mut iter = conditions.into_iter();
    let first = iter.next().unwrap_or_default();
    iter.fold(first, |acc, next| format!("{} {} or", acc, next))
}

/// Берет значение в кавычки с экранированием для лексера
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
