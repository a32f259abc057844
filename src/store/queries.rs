//! Сохраненные именованные запросы
//!
//! Текст фильтра, колонки и сортировка проверяются тем же парсером и
//! списком разрешённых полей, что и живые запросы, до любой записи в
//! хранилище.

use crate::common::types::Role;
use crate::common::{Error, Result};
use crate::compiler::{where_clause, AliasTable};
use crate::models::StoredQuery;
use crate::query::parse;
use crate::store::db::Db;
use serde::{Deserialize, Serialize};

/// Входные данные создания или изменения сохраненного запроса
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQueryInput {
    pub advisories: bool,
    pub global: bool,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub query: String,
    /// Количество параметров параметризованного запроса
    #[serde(default)]
    pub num: i64,
    pub columns: Vec<String>,
    #[serde(default)]
    pub orders: Option<Vec<String>>,
}

type StoredQueryRow = (
    i64,
    bool,
    String,
    bool,
    String,
    Option<String>,
    String,
    i64,
    Vec<String>,
    Option<Vec<String>>,
);

const STORED_QUERY_COLUMNS: &str =
    "id, advisories, definer, global, name, description, query, num, columns, orders";

fn from_row(row: StoredQueryRow) -> StoredQuery {
    let (id, advisories, definer, global, name, description, query, num, columns, orders) = row;
    StoredQuery {
        id,
        advisories,
        definer,
        global,
        name,
        description,
        query,
        num,
        columns,
        orders,
    }
}

/// Проверяет входные данные до любой записи
pub(crate) fn validate(input: &StoredQueryInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(Error::validation("name must not be blank"));
    }
    if input.num < 0 {
        return Err(Error::validation("num must not be negative"));
    }
    let expr = parse(&input.query)?;
    let aliases = AliasTable::for_advisories(input.advisories);
    // Пробная компиляция ловит неизвестные поля прямо в тексте фильтра
    where_clause(&expr, &aliases)?;
    aliases.check_projections(&input.columns)?;
    if let Some(orders) = &input.orders {
        aliases.create_order(orders)?;
    }
    Ok(())
}

/// Глобальные запросы может определять только администратор
pub(crate) fn check_global(global: bool, roles: &[Role]) -> Result<()> {
    if global && !roles.contains(&Role::Admin) {
        return Err(Error::access_denied("global queries require the admin role"));
    }
    Ok(())
}

/// Проверяет право изменять существующий запрос
pub(crate) fn check_ownership(definer: &str, roles: &[Role], owner: &str, global: bool) -> Result<()> {
    if global {
        return check_global(true, roles);
    }
    if owner != definer {
        return Err(Error::access_denied("stored query belongs to another definer"));
    }
    Ok(())
}

/// Создает сохраненный запрос и возвращает его идентификатор
pub async fn create_stored_query(
    db: &Db,
    definer: &str,
    roles: &[Role],
    input: &StoredQueryInput,
) -> Result<i64> {
    const INSERT: &str = "INSERT INTO stored_queries \
         (advisories, definer, global, name, description, query, num, columns, orders) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id";

    validate(input)?;
    check_global(input.global, roles)?;

    let id: i64 = sqlx::query_scalar(INSERT)
        .bind(input.advisories)
        .bind(definer)
        .bind(input.global)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.query)
        .bind(input.num)
        .bind(&input.columns)
        .bind(&input.orders)
        .fetch_one(db.pool())
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                Error::AlreadyExists
            }
            _ => Error::Store(err),
        })?;
    Ok(id)
}

/// Загружает запрос, видимый вызывающему: собственный или глобальный
pub async fn load_stored_query(db: &Db, definer: &str, id: i64) -> Result<StoredQuery> {
    let sql = format!(
        "SELECT {} FROM stored_queries WHERE id = $1 AND (definer = $2 OR global)",
        STORED_QUERY_COLUMNS
    );
    let row: Option<StoredQueryRow> = sqlx::query_as(&sql)
        .bind(id)
        .bind(definer)
        .fetch_optional(db.pool())
        .await?;
    row.map(from_row).ok_or(Error::NotFound)
}

/// Перечисляет собственные и глобальные запросы
pub async fn list_stored_queries(db: &Db, definer: &str) -> Result<Vec<StoredQuery>> {
    let sql = format!(
        "SELECT {} FROM stored_queries WHERE definer = $1 OR global ORDER BY id",
        STORED_QUERY_COLUMNS
    );
    let rows: Vec<StoredQueryRow> = sqlx::query_as(&sql).bind(definer).fetch_all(db.pool()).await?;
    Ok(rows.into_iter().map(from_row).collect())
}

/// Изменяет запрос; право на изменение проверяется под блокировкой строки
pub async fn update_stored_query(
    db: &Db,
    definer: &str,
    roles: &[Role],
    id: i64,
    input: &StoredQueryInput,
) -> Result<()> {
    const FIND: &str = "SELECT definer, global FROM stored_queries WHERE id = $1 FOR UPDATE";
    const UPDATE: &str = "UPDATE stored_queries SET \
         advisories = $2, global = $3, name = $4, description = $5, \
         query = $6, num = $7, columns = $8, orders = $9 \
         WHERE id = $1";

    validate(input)?;
    check_global(input.global, roles)?;

    let mut tx = db.pool().begin().await?;

    let row: Option<(String, bool)> = sqlx::query_as(FIND)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some((owner, global)) = row else {
        return Err(Error::NotFound);
    };
    check_ownership(definer, roles, &owner, global)?;

    sqlx::query(UPDATE)
        .bind(id)
        .bind(input.advisories)
        .bind(input.global)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.query)
        .bind(input.num)
        .bind(&input.columns)
        .bind(&input.orders)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Удаляет запрос с той же проверкой права владения
pub async fn delete_stored_query(db: &Db, definer: &str, roles: &[Role], id: i64) -> Result<()> {
    const FIND: &str = "SELECT definer, global FROM stored_queries WHERE id = $1 FOR UPDATE";
    const DELETE: &str = "DELETE FROM stored_queries WHERE id = $1";

    let mut tx = db.pool().begin().await?;

    let row: Option<(String, bool)> = sqlx::query_as(FIND)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some((owner, global)) = row else {
        return Err(Error::NotFound);
    };
    check_ownership(definer, roles, &owner, global)?;

    sqlx::query(DELETE).bind(id).execute(&mut *tx).await?;

    tx.commit().await?;
    Ok(())
}
