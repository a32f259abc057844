//! Политика авторизации переходов
//!
//! Решение о допустимости перехода вычисляется без обращения к
//! хранилищу: оркестратор сначала читает текущее состояние и метку
//! рекомендации, затем передает их сюда.

use crate::access::scope::TlpScope;
use crate::common::types::{Role, Tlp, Workflow};
use crate::common::Error;
use crate::workflow::TransitionTable;

/// Причина отказа в переходе
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Рекомендация вне области видимости вызывающего
    NotVisible,
    /// Таблица переходов не содержит такого ребра
    NoTransition,
    /// У вызывающего нет ни одной из требуемых ролей
    MissingRole,
}

/// Решение политики
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

/// Проверяет переход рекомендации из `current` в `target`.
///
/// Порядок проверок фиксирован: сначала видимость по метке, затем
/// наличие ребра, затем роли вызывающего.
pub fn check_transition(
    current: &Workflow,
    target: &Workflow,
    caller_roles: &[Role],
    scope: &TlpScope,
    publisher: &str,
    tlp: Tlp,
    table: &TransitionTable,
) -> Decision {
    if !scope.is_unrestricted() && !scope.allowed(publisher, tlp) {
        return Decision::Deny(DenyReason::NotVisible);
    }
    let roles = table.transitions_roles(current, target);
    if roles.is_empty() {
        return Decision::Deny(DenyReason::NoTransition);
    }
    if !roles.iter().any(|role| caller_roles.contains(role)) {
        return Decision::Deny(DenyReason::MissingRole);
    }
    Decision::Allow
}

impl DenyReason {
    /// Преобразует отказ в ошибку сервиса
    pub fn into_error(self, current: &Workflow, target: &Workflow) -> Error {
        match self {
            DenyReason::NotVisible => Error::access_denied("advisory is out of scope"),
            DenyReason::NoTransition => {
                Error::transition_not_allowed(current.as_str(), target.as_str())
            }
            DenyReason::MissingRole => Error::access_denied(format!(
                "transition {} -> {} requires another role",
                current, target
            )),
        }
    }
}
