pub mod sqlite;
pub mod traits;

pub use traits::{DictionaryRepository, WotdRepository};

/// Errors from the persistence layer.
///
/// `Connection` covers failures to reach the store at all; everything that
/// goes wrong once a statement runs (syntax, constraint violations, decode
/// failures) surfaces as `Query`.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot open database {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(String),
}
