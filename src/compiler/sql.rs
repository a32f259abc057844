//! Компиляция дерева выражений в параметризованный SQL
//!
//! Литералы никогда не вставляются в текст запроса: они уходят в
//! список привязываемых значений, а в тексте остаются только
//! позиционные заполнители. Это единственная защита от инъекций,
//! и она не обходится ни одним путём компиляции.

use crate::common::{Error, Result};
use crate::compiler::aliases::{AliasTable, Join, OrderClause};
use crate::query::{Expr, Value, ValueType};
use std::collections::BTreeSet;

/// Скомпилированное условие: текст предиката, значения для
/// заполнителей и соединения, на которые ссылаются поля
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<Value>,
    pub joins: BTreeSet<Join>,
}

/// Сводит дерево выражений к условию WHERE
pub fn where_clause(expr: &Expr, aliases: &AliasTable) -> Result<WhereClause> {
    let mut out = WhereClause {
        sql: String::new(),
        params: Vec::new(),
        joins: BTreeSet::new(),
    };
    emit_predicate(expr, aliases, &mut out)?;
    Ok(out)
}

/// Узел в позиции условия (булев контекст)
fn emit_predicate(expr: &Expr, aliases: &AliasTable, out: &mut WhereClause) -> Result<()> {
    match expr {
        Expr::Literal(Value::Bool(b)) => {
            out.sql.push_str(if *b { "TRUE" } else { "FALSE" });
            Ok(())
        }
        Expr::Field(name) => {
            let alias = aliases.resolve(name)?;
            if alias.value_type != ValueType::Bool {
                return Err(Error::parse(format!(
                    "field '{}' is not a condition",
                    name
                )));
            }
            if let Some(join) = alias.join {
                out.joins.insert(join);
            }
            out.sql.push_str(alias.expr);
            Ok(())
        }
        Expr::Compare { op, left, right } => {
            check_compare_types(left, right, aliases)?;
            emit_operand(left, aliases, out)?;
            out.sql.push(' ');
            out.sql.push_str(op.sql());
            out.sql.push(' ');
            emit_operand(right, aliases, out)
        }
        Expr::Not(inner) => {
            out.sql.push_str("NOT (");
            emit_predicate(inner, aliases, out)?;
            out.sql.push(')');
            Ok(())
        }
        Expr::And(a, b) => {
            out.sql.push('(');
            emit_predicate(a, aliases, out)?;
            out.sql.push_str(" AND ");
            emit_predicate(b, aliases, out)?;
            out.sql.push(')');
            Ok(())
        }
        Expr::Or(a, b) => {
            out.sql.push('(');
            emit_predicate(a, aliases, out)?;
            out.sql.push_str(" OR ");
            emit_predicate(b, aliases, out)?;
            out.sql.push(')');
            Ok(())
        }
        Expr::Literal(_) => Err(Error::parse("literal is not a condition")),
    }
}

/// Узел в позиции операнда сравнения
fn emit_operand(expr: &Expr, aliases: &AliasTable, out: &mut WhereClause) -> Result<()> {
    match expr {
        Expr::Field(name) => {
            let alias = aliases.resolve(name)?;
            if let Some(join) = alias.join {
                out.joins.insert(join);
            }
            out.sql.push_str(alias.expr);
            Ok(())
        }
        Expr::Literal(value) => {
            out.params.push(value.clone());
            out.sql.push_str(&format!("${}", out.params.len()));
            Ok(())
        }
        _ => Err(Error::parse(
            "nested condition used as a comparison operand",
        )),
    }
}

/// Тип операнда сравнения
fn operand_type(expr: &Expr, aliases: &AliasTable) -> Result<ValueType> {
    match expr {
        Expr::Field(name) => Ok(aliases.resolve(name)?.value_type),
        Expr::Literal(value) => Ok(value.value_type()),
        _ => Err(Error::parse(
            "nested condition used as a comparison operand",
        )),
    }
}

fn check_compare_types(left: &Expr, right: &Expr, aliases: &AliasTable) -> Result<()> {
    let lt = operand_type(left, aliases)?;
    let rt = operand_type(right, aliases)?;
    if lt == ValueType::Blob || rt == ValueType::Blob {
        return Err(Error::parse("raw document content is not comparable"));
    }
    if lt != rt {
        return Err(Error::parse(format!(
            "type mismatch: cannot compare {:?} with {:?}",
            lt, rt
        )));
    }
    Ok(())
}

/// Собирает SELECT по проверенному списку колонок.
///
/// `limit`/`offset` со значением `None` означают отсутствие границы.
pub fn create_query_sql(
    fields: &[String],
    aliases: &AliasTable,
    where_clause: &WhereClause,
    order: Option<&OrderClause>,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<String> {
    let mut joins = where_clause.joins.clone();
    joins.extend(aliases.base_joins().iter().copied());
    let mut columns = Vec::with_capacity(fields.len());
    for field in fields {
        let alias = aliases.resolve(field)?;
        if let Some(join) = alias.join {
            joins.insert(join);
        }
        columns.push(alias.expr);
    }
    if let Some(order) = order {
        joins.extend(order.joins.iter().copied());
    }

    let mut sql = format!("SELECT {} FROM documents docs", columns.join(", "));
    for join in &joins {
        sql.push(' ');
        sql.push_str(join.sql());
    }
    sql.push_str(" WHERE ");
    sql.push_str(&where_clause.sql);
    if let Some(order) = order {
        if !order.sql.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.sql);
        }
    }
    if let Some(limit) = limit {
        if limit < 0 {
            return Err(Error::validation("limit must not be negative"));
        }
        sql.push_str(&format!(" LIMIT {}", limit));
    }
    if let Some(offset) = offset {
        if offset < 0 {
            return Err(Error::validation("offset must not be negative"));
        }
        sql.push_str(&format!(" OFFSET {}", offset));
    }
    Ok(sql)
}

/// Собирает COUNT по тому же предикату, отбрасывая проекции и сортировку
pub fn create_count_sql(aliases: &AliasTable, where_clause: &WhereClause) -> String {
    let mut joins = where_clause.joins.clone();
    joins.extend(aliases.base_joins().iter().copied());
    let mut sql = String::from("SELECT count(*) FROM documents docs");
    for join in &joins {
        sql.push(' ');
        sql.push_str(join.sql());
    }
    sql.push_str(" WHERE ");
    sql.push_str(&where_clause.sql);
    sql
}
