//! Дескриптор хранилища
//!
//! Пул подключений — внешний черный ящик: каждый запрос берет из него
//! одно подключение и гарантированно возвращает его на любом пути
//! выхода. Здесь же живет один раз скомпилированный шаблон подстановки
//! параметров для диагностического журналирования.

use crate::common::config::DatabaseConfig;
use crate::common::{Error, Result};
use crate::query::Value;
use regex::Regex;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::{Query, QueryScalar};
use sqlx::{PgPool, Postgres};
use std::time::Duration;

/// Дескриптор хранилища: пул подключений и вспомогательная диагностика
#[derive(Clone)]
pub struct Db {
    pool: PgPool,
    /// Шаблон `$N`, собирается один раз при создании дескриптора
    placeholder: Regex,
}

impl Db {
    /// Оборачивает готовый пул
    pub fn new(pool: PgPool) -> Result<Self> {
        let placeholder = Regex::new(r"\$(\d+)")
            .map_err(|e| Error::configuration(format!("placeholder pattern: {}", e)))?;
        Ok(Self { pool, placeholder })
    }

    /// Подключается к базе по конфигурации
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .connect(&config.url)
            .await?;
        Self::new(pool)
    }

    /// Пул подключений
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Подставляет параметры обратно в текст запроса.
    ///
    /// Текст и параметры были разделены компилятором до этого вызова;
    /// результат подстановки идет только в журнал и никогда не
    /// исполняется.
    pub(crate) fn debug_sql(&self, sql: &str, params: &[Value]) -> String {
        self.placeholder
            .replace_all(sql, |caps: &regex::Captures| {
                let n: usize = caps[1].parse().unwrap_or(0);
                match n.checked_sub(1).and_then(|i| params.get(i)) {
                    Some(value) => format!("'{}'", value),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Готовит запрос с привязкой скомпилированных значений
pub(crate) fn bind_query<'q>(sql: &'q str, params: &'q [Value]) -> Query<'q, Postgres, PgArguments> {
    let mut query = sqlx::query(sql);
    for value in params {
        query = match value {
            Value::Int(v) => query.bind(*v),
            Value::String(v) => query.bind(v.as_str()),
            Value::Bool(v) => query.bind(*v),
            Value::Time(v) => query.bind(*v),
            Value::Workflow(v) => query.bind(v.as_str()),
            Value::Tlp(v) => query.bind(v.as_str()),
        };
    }
    query
}

/// То же для запросов с одним столбцом результата
pub(crate) fn bind_scalar<'q, O>(
    sql: &'q str,
    params: &'q [Value],
) -> QueryScalar<'q, Postgres, O, PgArguments>
where
    O: for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    let mut query = sqlx::query_scalar(sql);
    for value in params {
        query = match value {
            Value::Int(v) => query.bind(*v),
            Value::String(v) => query.bind(v.as_str()),
            Value::Bool(v) => query.bind(*v),
            Value::Time(v) => query.bind(*v),
            Value::Workflow(v) => query.bind(v.as_str()),
            Value::Tlp(v) => query.bind(v.as_str()),
        };
    }
    query
}
