//! SQLite-backed implementation of [`DictionaryRepository`].

use sqlx::SqlitePool;
use tracing::{debug, info};
use vocab::{BulkAddReport, DictionaryTerm};

use crate::persistence::traits::DictionaryRepository;
use crate::persistence::PersistenceError;

/// Row type for `dictionary` queries, mapped via `sqlx::FromRow`.
#[derive(sqlx::FromRow)]
struct TermRow {
    term: String,
    pinyin: Option<String>,
    definition: Option<String>,
    traditional: Option<String>,
    hsk: Option<i64>,
}

impl From<TermRow> for DictionaryTerm {
    fn from(r: TermRow) -> Self {
        Self {
            term: r.term,
            pinyin: r.pinyin,
            definition: r.definition,
            traditional: r.traditional,
            hsk: r.hsk.and_then(|v| u8::try_from(v).ok()),
            extra: Default::default(),
        }
    }
}

pub struct SqliteDictionaryRepository {
    pool: SqlitePool,
}

impl SqliteDictionaryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a single term. Fails with a constraint violation if the term
    /// already exists or is empty.
    pub async fn insert(&self, term: &DictionaryTerm) -> Result<(), PersistenceError> {
        if !term.extra.is_empty() {
            debug!(
                term = %term.term,
                columns = ?term.extra.keys().collect::<Vec<_>>(),
                "Dropping columns the dictionary table does not store"
            );
        }

        sqlx::query(
            "INSERT INTO dictionary (term, pinyin, definition, traditional, hsk) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&term.term)
        .bind(&term.pinyin)
        .bind(&term.definition)
        .bind(&term.traditional)
        .bind(term.hsk.map(i64::from))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl DictionaryRepository for SqliteDictionaryRepository {
    async fn exists(&self, term: &str) -> Result<bool, PersistenceError> {
        let row: (i64,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM dictionary WHERE term = ?)")
                .bind(term)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0 != 0)
    }

    async fn find(&self, term: &str) -> Result<Option<DictionaryTerm>, PersistenceError> {
        let row: Option<TermRow> = sqlx::query_as(
            "SELECT term, pinyin, definition, traditional, hsk \
             FROM dictionary WHERE term = ?",
        )
        .bind(term)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DictionaryTerm::from))
    }

    async fn count_all(&self) -> Result<u64, PersistenceError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dictionary")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 as u64)
    }

    async fn bulk_add(
        &self,
        terms: &[DictionaryTerm],
    ) -> Result<BulkAddReport<String>, PersistenceError> {
        let mut report = BulkAddReport::default();

        for term in terms {
            if self.exists(&term.term).await? {
                debug!(term = %term.term, "Already in dictionary, skipping");
                report.skipped.push(term.term.clone());
            } else {
                self.insert(term).await?;
                report.added.push(term.term.clone());
            }
        }

        info!(
            added = report.added.len(),
            skipped = report.skipped.len(),
            "Dictionary bulk add finished"
        );
        Ok(report)
    }
}
