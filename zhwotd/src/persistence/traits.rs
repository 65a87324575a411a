//! Async repository trait definitions for the persistence layer.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! callers generic over a repository can still hand the futures to
//! `tokio::spawn`.

use std::future::Future;

use chrono::NaiveDate;
use vocab::{BulkAddReport, DictionaryTerm, WotdEntry};

use super::PersistenceError;

/// Repository for the word-of-the-day log.
///
/// Implementations must keep at most one entry per date.
pub trait WotdRepository: Send + Sync {
    fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<WotdEntry>, PersistenceError>> + Send;
    /// Every entry for `word`, oldest first.
    fn find_by_word(
        &self,
        word: &str,
    ) -> impl Future<Output = Result<Vec<WotdEntry>, PersistenceError>> + Send;
    fn count_occurrences(
        &self,
        word: &str,
    ) -> impl Future<Output = Result<u64, PersistenceError>> + Send;
    fn exists_on_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
    fn min_date(&self) -> impl Future<Output = Result<Option<NaiveDate>, PersistenceError>> + Send;
    fn max_date(&self) -> impl Future<Output = Result<Option<NaiveDate>, PersistenceError>> + Send;
    /// Dates between the earliest and latest entry that have no entry.
    fn find_missing_dates(
        &self,
    ) -> impl Future<Output = Result<Vec<NaiveDate>, PersistenceError>> + Send;
    fn count_all(&self) -> impl Future<Output = Result<u64, PersistenceError>> + Send;
    /// Insert entries whose date is still free; entries on taken dates are
    /// reported as skipped.
    fn bulk_add(
        &self,
        entries: &[WotdEntry],
    ) -> impl Future<Output = Result<BulkAddReport<WotdEntry>, PersistenceError>> + Send;
}

/// Repository for dictionary terms, keyed by term.
///
/// `bulk_add` is not atomic across the batch: an error partway through keeps
/// the terms inserted before it.
pub trait DictionaryRepository: Send + Sync {
    fn exists(&self, term: &str) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
    fn find(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Option<DictionaryTerm>, PersistenceError>> + Send;
    fn count_all(&self) -> impl Future<Output = Result<u64, PersistenceError>> + Send;
    fn bulk_add(
        &self,
        terms: &[DictionaryTerm],
    ) -> impl Future<Output = Result<BulkAddReport<String>, PersistenceError>> + Send;
}
