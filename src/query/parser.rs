//! Разбор языка фильтров advisorydb
//!
//! Грамматика вычисляется стековой машиной слева направо: операнды
//! кладутся на стек, операторы снимают свою арность и кладут обратно
//! узел выражения. Приоритетов и скобок в языке нет, поэтому таблица
//! предшествования не нужна. Разбор чистый и детерминированный:
//! одинаковый текст всегда дает структурно одинаковое дерево.

use crate::common::types::Tlp;
use crate::common::{Error, Result};
use crate::query::ast::{CompareOp, Expr, Value};
use crate::query::lexer::Lexer;
use crate::query::token::{Token, TokenKind};
use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

/// Стековый парсер языка фильтров
pub struct QueryParser {
    tokens: Vec<Token>,
}

impl QueryParser {
    /// Создает парсер над уже разобранным в токены входом
    pub fn new(input: &str) -> Result<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self { tokens })
    }

    /// Вычисляет токены на стеке и возвращает корень дерева.
    ///
    /// В конце на стеке должен остаться ровно один булев узел.
    pub fn parse(&self) -> Result<Expr> {
        let mut stack: Vec<Expr> = Vec::new();

        for token in &self.tokens {
            match token.kind {
                TokenKind::Field => stack.push(Expr::Field(token.value.clone())),
                TokenKind::Literal => {
                    stack.push(Expr::Literal(Value::String(token.value.clone())))
                }
                TokenKind::True => stack.push(Expr::Literal(Value::Bool(true))),
                TokenKind::False => stack.push(Expr::Literal(Value::Bool(false))),
                kind if kind.is_cast() => {
                    let operand = pop_one(&mut stack, token)?;
                    stack.push(apply_cast(kind, operand, token)?);
                }
                kind if kind.is_compare() => {
                    let (left, right) = pop_two(&mut stack, token)?;
                    if !left.is_operand() || !right.is_operand() {
                        return Err(Error::parse(format!(
                            "'{}' needs field or literal operands at {}",
                            token.value, token.position
                        )));
                    }
                    stack.push(Expr::Compare {
                        op: compare_op(kind),
                        left: Box::new(left),
                        right: Box::new(right),
                    });
                }
                TokenKind::Not => {
                    let operand = pop_one(&mut stack, token)?;
                    if !operand.is_boolean() {
                        return Err(boolean_expected(token));
                    }
                    stack.push(Expr::Not(Box::new(operand)));
                }
                TokenKind::And | TokenKind::Or => {
                    let (left, right) = pop_two(&mut stack, token)?;
                    if !left.is_boolean() || !right.is_boolean() {
                        return Err(boolean_expected(token));
                    }
                    stack.push(if token.kind == TokenKind::And {
                        Expr::And(Box::new(left), Box::new(right))
                    } else {
                        Expr::Or(Box::new(left), Box::new(right))
                    });
                }
                _ => unreachable!("token kinds are fully covered"),
            }
        }

        if stack.len() > 1 {
            return Err(Error::parse(format!(
                "{} operands left on the stack after evaluation",
                stack.len()
            )));
        }
        let Some(root) = stack.pop() else {
            return Err(Error::parse("empty expression"));
        };
        if !root.is_boolean() {
            return Err(Error::parse("expression is not a condition"));
        }
        Ok(root)
    }
}

/// Разбирает текст фильтра в дерево выражений
pub fn parse(input: &str) -> Result<Expr> {
    QueryParser::new(input)?.parse()
}

fn pop_one(stack: &mut Vec<Expr>, token: &Token) -> Result<Expr> {
    stack.pop().ok_or_else(|| underflow(token))
}

fn pop_two(stack: &mut Vec<Expr>, token: &Token) -> Result<(Expr, Expr)> {
    let right = stack.pop().ok_or_else(|| underflow(token))?;
    let left = stack.pop().ok_or_else(|| underflow(token))?;
    Ok((left, right))
}

fn underflow(token: &Token) -> Error {
    Error::parse(format!(
        "'{}' applied with too few operands at {}",
        token.value, token.position
    ))
}

fn boolean_expected(token: &Token) -> Error {
    Error::parse(format!(
        "'{}' needs boolean operands at {}",
        token.value, token.position
    ))
}

fn compare_op(kind: TokenKind) -> CompareOp {
    match kind {
        TokenKind::Eq => CompareOp::Eq,
        TokenKind::Ne => CompareOp::Ne,
        TokenKind::Lt => CompareOp::Lt,
        TokenKind::Le => CompareOp::Le,
        TokenKind::Gt => CompareOp::Gt,
        TokenKind::Ge => CompareOp::Ge,
        _ => unreachable!("is_compare() was checked"),
    }
}

/// Применяет метку приведения типа к литералу на вершине стека
fn apply_cast(kind: TokenKind, operand: Expr, token: &Token) -> Result<Expr> {
    let Expr::Literal(Value::String(raw)) = operand else {
        return Err(Error::parse(format!(
            "cast '{}' applies to an untyped literal at {}",
            token.value, token.position
        )));
    };
    let value = match kind {
        TokenKind::CastInt => Value::Int(raw.parse::<i64>().map_err(|_| bad_literal(&raw, token))?),
        TokenKind::CastString => Value::String(raw),
        TokenKind::CastBool => match raw.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => return Err(bad_literal(&raw, token)),
        },
        TokenKind::CastTime => Value::Time(parse_time(&raw).ok_or_else(|| bad_literal(&raw, token))?),
        TokenKind::CastWorkflow => Value::Workflow(raw),
        TokenKind::CastTlp => Value::Tlp(Tlp::from_str(&raw).map_err(|_| bad_literal(&raw, token))?),
        _ => unreachable!("is_cast() was checked"),
    };
    Ok(Expr::Literal(value))
}

fn bad_literal(raw: &str, token: &Token) -> Error {
    Error::parse(format!(
        "cannot parse '{}' as {} at {}",
        raw, token.value, token.position
    ))
}

/// Принимает RFC 3339 или дату без времени (полночь UTC)
fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(DateTime::from_naive_utc_and_offset(
        date.and_hms_opt(0, 0, 0)?,
        Utc,
    ))
}
