//! Списки, экспорт и импорт документов
//!
//! Все запросы к документам проходят один и тот же путь компиляции:
//! пользовательское выражение, поверх него фильтр конфиденциальности,
//! затем проверка проекций и сортировки, затем построение SQL.

use crate::access::TlpScope;
use crate::common::config::GeneralConfig;
use crate::common::types::Tlp;
use crate::common::{Error, Result};
use crate::compiler::{create_count_sql, create_query_sql, where_clause, AliasTable};
use crate::models::{Document, EventKind};
use crate::query::{parse, Expr, ValueType};
use crate::store::db::{bind_query, bind_scalar, Db};
use crate::store::events::append_event;
use crate::workflow::TransitionTable;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row as _;

/// Параметры запроса списка
#[derive(Debug, Clone)]
pub struct OverviewRequest {
    /// Текст фильтра на языке запросов
    pub query: String,
    /// Проецируемые колонки; пустой список отключает выборку строк
    pub columns: Vec<String>,
    /// Поля сортировки, ведущий `-` — по убыванию
    pub order: Vec<String>,
    /// Схема рекомендаций вместо схемы документов
    pub advisories: bool,
    /// Посчитать количество строк под тем же предикатом
    pub count: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl OverviewRequest {
    /// Запрос со значениями по умолчанию из конфигурации
    pub fn with_defaults(general: &GeneralConfig, advisories: bool) -> Self {
        Self {
            query: "true".to_string(),
            columns: general.default_columns.clone(),
            order: general.default_order.clone(),
            advisories,
            count: false,
            limit: None,
            offset: None,
        }
    }
}

/// Результат запроса списка
#[derive(Debug, Clone, Default)]
pub struct OverviewResult {
    pub documents: Vec<serde_json::Map<String, serde_json::Value>>,
    pub count: Option<i64>,
}

/// Навешивает фильтр конфиденциальности поверх выражения.
///
/// Фильтр всегда остается внешним операндом И и не может пропасть из
/// запроса; пустая область видимости означает отсутствие ограничений.
pub(crate) fn with_scope(expr: Expr, scope: &TlpScope) -> Result<Expr> {
    if scope.is_unrestricted() {
        return Ok(expr);
    }
    let conditions = scope.as_conditions();
    let scope_expr = parse(&conditions).map_err(|e| {
        tracing::warn!(error = %e, "confidentiality filter failed");
        Error::configuration("confidentiality filter failed")
    })?;
    Ok(expr.and(scope_expr))
}

/// Выполняет запрос списка документов или рекомендаций
pub async fn overview(db: &Db, scope: &TlpScope, request: &OverviewRequest) -> Result<OverviewResult> {
    let expr = with_scope(parse(&request.query)?, scope)?;
    let aliases = AliasTable::for_advisories(request.advisories);

    // Проекции и сортировка проверяются до построения запроса
    aliases.check_projections(&request.columns)?;
    let order = aliases.create_order(&request.order)?;
    let clause = where_clause(&expr, &aliases)?;

    let mut result = OverviewResult::default();

    if request.count {
        let sql = create_count_sql(&aliases, &clause);
        result.count = Some(bind_scalar(&sql, &clause.params).fetch_one(db.pool()).await?);
    }
    // Колонки могут быть не запрошены: тогда выполняется только счетчик
    if request.columns.is_empty() {
        return Ok(result);
    }

    let sql = create_query_sql(
        &request.columns,
        &aliases,
        &clause,
        Some(&order),
        request.limit,
        request.offset,
    )?;
    tracing::debug!(sql = %db.debug_sql(&sql, &clause.params), "documents overview");

    let rows = bind_query(&sql, &clause.params).fetch_all(db.pool()).await?;
    for row in &rows {
        let mut object = serde_json::Map::new();
        for (index, column) in request.columns.iter().enumerate() {
            let alias = aliases.resolve(column)?;
            object.insert(column.clone(), decode_column(row, index, alias.value_type)?);
        }
        result.documents.push(object);
    }
    Ok(result)
}

/// Читает значение колонки по типу из списка разрешённых полей
fn decode_column(row: &PgRow, index: usize, value_type: ValueType) -> Result<serde_json::Value> {
    let value = match value_type {
        ValueType::Int => row
            .try_get::<Option<i64>, _>(index)?
            .map(serde_json::Value::from),
        ValueType::String | ValueType::Workflow | ValueType::Tlp => row
            .try_get::<Option<String>, _>(index)?
            .map(serde_json::Value::from),
        ValueType::Bool => row
            .try_get::<Option<bool>, _>(index)?
            .map(serde_json::Value::from),
        ValueType::Time => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(|ts| serde_json::Value::from(ts.to_rfc3339())),
        ValueType::Blob => row
            .try_get::<Option<Vec<u8>>, _>(index)?
            .map(|bytes| serde_json::Value::from(String::from_utf8_lossy(&bytes).into_owned())),
    };
    Ok(value.unwrap_or(serde_json::Value::Null))
}

/// Экспортирует сохраненные байты документа по идентификатору.
///
/// Фильтр по идентификатору компилируется тем же путём и получает тот
/// же фильтр конфиденциальности, что и списки: документ вне области
/// видимости неотличим от несуществующего.
pub async fn export_document(db: &Db, scope: &TlpScope, id: i64) -> Result<Vec<u8>> {
    let expr = with_scope(parse(&format!("$id {} int =", id))?, scope)?;
    let aliases = AliasTable::documents();
    let clause = where_clause(&expr, &aliases)?;
    let fields = vec!["original".to_string()];
    let sql = create_query_sql(&fields, &aliases, &clause, None, None, None)?;

    let original: Option<Vec<u8>> = bind_scalar(&sql, &clause.params)
        .fetch_optional(db.pool())
        .await?;
    original.ok_or(Error::NotFound)
}

/// Читает метаданные документа по идентификатору.
///
/// Фильтр компилируется тем же путём, что и списки, с тем же фильтром
/// конфиденциальности.
pub async fn get_document(db: &Db, scope: &TlpScope, id: i64) -> Result<Document> {
    const FIELDS: [&str; 9] = [
        "id",
        "tracking_id",
        "publisher",
        "version",
        "title",
        "tlp",
        "current_release_date",
        "initial_release_date",
        "imported",
    ];

    let expr = with_scope(parse(&format!("$id {} int =", id))?, scope)?;
    let aliases = AliasTable::documents();
    let clause = where_clause(&expr, &aliases)?;
    let fields: Vec<String> = FIELDS.iter().map(|s| s.to_string()).collect();
    let sql = create_query_sql(&fields, &aliases, &clause, None, None, None)?;

    let row = bind_query(&sql, &clause.params)
        .fetch_optional(db.pool())
        .await?;
    let Some(row) = row else {
        return Err(Error::NotFound);
    };
    Ok(Document {
        id: row.try_get(0)?,
        tracking_id: row.try_get(1)?,
        publisher: row.try_get(2)?,
        version: row.try_get(3)?,
        title: row.try_get(4)?,
        tlp: row
            .try_get::<String, _>(5)?
            .parse()
            .map_err(Error::configuration)?,
        current_release_date: row.try_get(6)?,
        initial_release_date: row.try_get(7)?,
        imported: row.try_get(8)?,
    })
}

/// Удаляет документ.
///
/// Видимость проверяется как при экспорте; связанные записи журнала и
/// осиротевшая рекомендация убираются каскадом схемы.
pub async fn delete_document(db: &Db, scope: &TlpScope, id: i64) -> Result<()> {
    const DELETE: &str = "DELETE FROM documents WHERE id = $1";

    let document = get_document(db, scope, id).await?;
    sqlx::query(DELETE).bind(id).execute(db.pool()).await?;
    tracing::debug!(id, publisher = %document.publisher, "document deleted");
    Ok(())
}

/// Данные импортируемого документа.
///
/// Извлечение полей из загруженного файла, ограничение размера и
/// дедупликация содержимого — забота внешнего слоя загрузки.
#[derive(Debug, Clone)]
pub struct DocumentImport {
    pub tracking_id: String,
    pub publisher: String,
    pub version: String,
    pub title: String,
    pub tlp: Tlp,
    pub current_release_date: Option<DateTime<Utc>>,
    pub initial_release_date: Option<DateTime<Utc>>,
    /// Исходные байты документа
    pub original: Vec<u8>,
}

/// Импортирует документ и создает рекомендацию в начальном состоянии.
///
/// Документ, рекомендация и запись журнала пишутся в одной транзакции.
pub async fn import_document(
    db: &Db,
    scope: &TlpScope,
    actor: Option<&str>,
    table: &TransitionTable,
    document: &DocumentImport,
) -> Result<i64> {
    const INSERT_DOCUMENT: &str = "INSERT INTO documents \
         (tracking_id, publisher, version, title, tlp, current_release_date, initial_release_date, original) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id";
    const INSERT_ADVISORY: &str = "INSERT INTO advisories (tracking_id, publisher, state) \
         VALUES ($1, $2, $3::workflow) ON CONFLICT (tracking_id, publisher) DO NOTHING";

    for (field, value) in [
        ("tracking_id", &document.tracking_id),
        ("publisher", &document.publisher),
        ("version", &document.version),
    ] {
        if value.trim().is_empty() {
            return Err(Error::validation(format!("{} must not be blank", field)));
        }
    }
    if !scope.is_unrestricted() && !scope.allowed(&document.publisher, document.tlp) {
        return Err(Error::access_denied("wrong publisher/tlp"));
    }

    let initial = table.initial_state();
    let mut tx = db.pool().begin().await?;

    let id: i64 = sqlx::query_scalar(INSERT_DOCUMENT)
        .bind(&document.tracking_id)
        .bind(&document.publisher)
        .bind(&document.version)
        .bind(&document.title)
        .bind(document.tlp.as_str())
        .bind(document.current_release_date)
        .bind(document.initial_release_date)
        .bind(&document.original)
        .fetch_one(&mut *tx)
        .await
        .map_err(duplicate_to_exists)?;

    sqlx::query(INSERT_ADVISORY)
        .bind(&document.tracking_id)
        .bind(&document.publisher)
        .bind(initial.as_str())
        .execute(&mut *tx)
        .await?;

    append_event(&mut tx, EventKind::ImportDocument, initial, actor, id).await?;

    tx.commit().await?;
    tracing::debug!(id, publisher = %document.publisher, "document imported");
    Ok(id)
}

/// Переводит нарушение уникальности в ошибку дубликата
fn duplicate_to_exists(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return Error::AlreadyExists;
        }
    }
    Error::Store(err)
}
