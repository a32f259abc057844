//! Дерево выражений языка фильтров advisorydb

use crate::common::types::Tlp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Тип значения литерала или колонки хранилища
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Int,
    String,
    Bool,
    Time,
    Workflow,
    Tlp,
    /// Сырые байты документа; литералов этого типа не бывает
    Blob,
}

/// Типизированное значение литерала
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    String(String),
    Bool(bool),
    Time(DateTime<Utc>),
    Workflow(String),
    Tlp(Tlp),
}

impl Value {
    /// Возвращает тип значения
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::String(_) => ValueType::String,
            Value::Bool(_) => ValueType::Bool,
            Value::Time(_) => ValueType::Time,
            Value::Workflow(_) => ValueType::Workflow,
            Value::Tlp(_) => ValueType::Tlp,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Time(v) => write!(f, "{}", v.to_rfc3339()),
            Value::Workflow(v) => write!(f, "{}", v),
            Value::Tlp(v) => write!(f, "{}", v),
        }
    }
}

/// Оператор сравнения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// SQL представление оператора
    pub fn sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql())
    }
}

/// Узел дерева выражений
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Ссылка на поле по имени из списка разрешённых
    Field(String),
    /// Типизированный литерал
    Literal(Value),
    /// Сравнение двух операндов
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Логическое отрицание
    Not(Box<Expr>),
    /// Логическое И
    And(Box<Expr>, Box<Expr>),
    /// Логическое ИЛИ
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Соединяет два выражения логическим И.
    ///
    /// Используется для навешивания фильтра конфиденциальности поверх
    /// пользовательского запроса.
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    /// Проверяет, дает ли узел булево значение
    pub fn is_boolean(&self) -> bool {
        matches!(
            self,
            Expr::Compare { .. }
                | Expr::Not(_)
                | Expr::And(_, _)
                | Expr::Or(_, _)
                | Expr::Literal(Value::Bool(_))
        )
    }

    /// Проверяет, пригоден ли узел как операнд сравнения
    pub fn is_operand(&self) -> bool {
        matches!(self, Expr::Field(_) | Expr::Literal(_))
    }
}
