//! Слой хранилища advisorydb

pub mod advisories;
pub mod db;
pub mod documents;
pub mod events;
pub mod queries;

#[cfg(test)]
pub mod tests;

pub use advisories::{change_state, change_states, StateChangeRequest};
pub use db::Db;
pub use documents::{
    delete_document, export_document, get_document, import_document, overview, DocumentImport,
    OverviewRequest, OverviewResult,
};
pub use events::events_for_document;
pub use queries::{
    create_stored_query, delete_stored_query, list_stored_queries, load_stored_query,
    update_stored_query, StoredQueryInput,
};
