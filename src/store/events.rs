//! Журнал событий
//!
//! Журнал только пополняется; каждая запись ссылается на документ и
//! несет вид события, итоговое состояние и необязательного актора.

use crate::access::TlpScope;
use crate::common::types::Workflow;
use crate::common::{Error, Result};
use crate::models::{AuditEntry, EventKind};
use crate::store::db::Db;
use crate::store::documents::get_document;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

/// Добавляет запись журнала внутри открытой транзакции.
///
/// Время записи проставляет хранилище.
pub(crate) async fn append_event(
    tx: &mut Transaction<'_, Postgres>,
    event: EventKind,
    state: &Workflow,
    actor: Option<&str>,
    documents_id: i64,
) -> Result<()> {
    const INSERT_LOG: &str = "INSERT INTO events_log (event, state, actor, documents_id) \
         VALUES ($1, $2::workflow, $3, $4)";

    sqlx::query(INSERT_LOG)
        .bind(event.as_str())
        .bind(state.as_str())
        .bind(actor)
        .bind(documents_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Перечисляет события документа.
///
/// Видимость документа проверяется тем же путём, что и экспорт:
/// документ вне области видимости неотличим от несуществующего.
pub async fn events_for_document(
    db: &Db,
    scope: &TlpScope,
    documents_id: i64,
) -> Result<Vec<AuditEntry>> {
    const SELECT_EVENTS: &str = "SELECT event, state::text, actor, documents_id, time \
         FROM events_log WHERE documents_id = $1 ORDER BY time, event";

    // Проверка видимости; сами события фильтра не имеют
    get_document(db, scope, documents_id).await?;

    let rows: Vec<(String, String, Option<String>, i64, DateTime<Utc>)> =
        sqlx::query_as(SELECT_EVENTS)
            .bind(documents_id)
            .fetch_all(db.pool())
            .await?;

    rows.into_iter()
        .map(|(event, state, actor, documents_id, time)| {
            Ok(AuditEntry {
                event: event.parse().map_err(Error::configuration)?,
                state: Workflow::new(state),
                actor,
                documents_id,
                time,
            })
        })
        .collect()
}
