//! SQLite-backed repository for the word-of-the-day log.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;
use vocab::dates::missing_dates;
use vocab::{BulkAddReport, WotdEntry};

use crate::persistence::traits::WotdRepository;
use crate::persistence::PersistenceError;

/// Row type for `wotd` queries, mapped via `sqlx::FromRow`.
#[derive(sqlx::FromRow)]
struct WotdRow {
    date: NaiveDate,
    word: String,
}

impl From<WotdRow> for WotdEntry {
    fn from(r: WotdRow) -> Self {
        Self {
            date: r.date,
            word: r.word,
        }
    }
}

/// SQLite implementation of [`WotdRepository`].
pub struct SqliteWotdRepository {
    pool: SqlitePool,
}

impl SqliteWotdRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a single entry. Fails with a constraint violation if the date
    /// is already taken.
    pub async fn insert(&self, entry: &WotdEntry) -> Result<(), PersistenceError> {
        sqlx::query("INSERT INTO wotd (date, word) VALUES (?, ?)")
            .bind(entry.date)
            .bind(&entry.word)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl WotdRepository for SqliteWotdRepository {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<WotdEntry>, PersistenceError> {
        let row: Option<WotdRow> = sqlx::query_as("SELECT date, word FROM wotd WHERE date = ?")
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(WotdEntry::from))
    }

    async fn find_by_word(&self, word: &str) -> Result<Vec<WotdEntry>, PersistenceError> {
        let rows: Vec<WotdRow> =
            sqlx::query_as("SELECT date, word FROM wotd WHERE word = ? ORDER BY date")
                .bind(word)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(WotdEntry::from).collect())
    }

    async fn count_occurrences(&self, word: &str) -> Result<u64, PersistenceError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM wotd WHERE word = ?")
            .bind(word)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 as u64)
    }

    async fn exists_on_date(&self, date: NaiveDate) -> Result<bool, PersistenceError> {
        let row: (i64,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM wotd WHERE date = ?)")
            .bind(date)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 != 0)
    }

    async fn min_date(&self) -> Result<Option<NaiveDate>, PersistenceError> {
        let row: (Option<NaiveDate>,) = sqlx::query_as("SELECT MIN(date) FROM wotd")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn max_date(&self) -> Result<Option<NaiveDate>, PersistenceError> {
        let row: (Option<NaiveDate>,) = sqlx::query_as("SELECT MAX(date) FROM wotd")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn find_missing_dates(&self) -> Result<Vec<NaiveDate>, PersistenceError> {
        let rows: Vec<(NaiveDate,)> = sqlx::query_as("SELECT date FROM wotd")
            .fetch_all(&self.pool)
            .await?;
        let present: BTreeSet<NaiveDate> = rows.into_iter().map(|(d,)| d).collect();

        let (Some(&min), Some(&max)) = (present.first(), present.last()) else {
            return Ok(Vec::new());
        };
        Ok(missing_dates(&present, min, max))
    }

    async fn count_all(&self) -> Result<u64, PersistenceError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM wotd")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 as u64)
    }

    async fn bulk_add(
        &self,
        entries: &[WotdEntry],
    ) -> Result<BulkAddReport<WotdEntry>, PersistenceError> {
        let mut report = BulkAddReport::default();

        for entry in entries {
            if self.exists_on_date(entry.date).await? {
                info!(date = %entry.date, word = %entry.word, "Date already has a word, skipping");
                report.skipped.push(entry.clone());
            } else {
                self.insert(entry).await?;
                report.added.push(entry.clone());
            }
        }

        info!(
            added = report.added.len(),
            skipped = report.skipped.len(),
            "Word-of-the-day bulk add finished"
        );
        Ok(report)
    }
}
