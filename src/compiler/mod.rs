//! Компилятор языка фильтров в параметризованный SQL

pub mod aliases;
pub mod sql;

#[cfg(test)]
pub mod tests;

pub use aliases::{Alias, AliasTable, Join, OrderClause, OrderDirection};
pub use sql::{create_count_sql, create_query_sql, where_clause, WhereClause};
