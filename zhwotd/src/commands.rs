//! Operations behind the command line, generic over the repository traits.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use vocab::{assign_dates, read_dictionary_csv, BulkAddReport, ParseError, StartDate, WotdEntry};

use crate::persistence::{DictionaryRepository, PersistenceError, WotdRepository};

/// Errors from a bulk import: either the input or the store failed.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Parse the dictionary CSV at `path` and add every term not yet present.
pub async fn import_dictionary<D: DictionaryRepository>(
    repo: &D,
    path: &Path,
) -> Result<BulkAddReport<String>, ImportError> {
    info!(path = %path.display(), "Importing dictionary");
    let terms = read_dictionary_csv(path)?;
    Ok(repo.bulk_add(&terms).await?)
}

/// Date `words` from `start` and add them to the log.
///
/// A [`StartDate::NextOpen`] start continues the day after the latest entry.
/// Nothing is stored when the words cannot all be dated.
pub async fn import_wotd<W: WotdRepository>(
    repo: &W,
    words: Vec<String>,
    start: StartDate,
    today: NaiveDate,
) -> Result<BulkAddReport<WotdEntry>, ImportError> {
    let latest = match start {
        StartDate::NextOpen => repo.max_date().await?,
        _ => None,
    };
    let first = start.resolve(today, latest)?;
    info!(start = %first, words = words.len(), "Importing word-of-the-day list");

    let entries = assign_dates(words, first)?;
    Ok(repo.bulk_add(&entries).await?)
}

/// Where a term stands in the dictionary and the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermStatus {
    pub term: String,
    pub in_dictionary: bool,
    pub wotd_count: u64,
}

pub async fn term_status<D, W>(dict: &D, wotd: &W, term: &str) -> Result<TermStatus, PersistenceError>
where
    D: DictionaryRepository,
    W: WotdRepository,
{
    Ok(TermStatus {
        term: term.to_string(),
        in_dictionary: dict.exists(term).await?,
        wotd_count: wotd.count_occurrences(term).await?,
    })
}

/// Earliest, latest and total entries of the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WotdRange {
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
    pub total: u64,
}

pub async fn wotd_range<W: WotdRepository>(repo: &W) -> Result<WotdRange, PersistenceError> {
    Ok(WotdRange {
        first: repo.min_date().await?,
        last: repo.max_date().await?,
        total: repo.count_all().await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::{Database, SqliteDictionaryRepository, SqliteWotdRepository};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[tokio::test]
    async fn test_import_wotd_explicit_start() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteWotdRepository::new(db.pool().clone());

        let report = import_wotd(
            &repo,
            words(&["一", "二", "三"]),
            StartDate::On(ymd(2024, 3, 1)),
            ymd(2030, 1, 1),
        )
        .await
        .unwrap();

        let dates: Vec<_> = report.added.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![ymd(2024, 3, 1), ymd(2024, 3, 2), ymd(2024, 3, 3)]);
    }

    #[tokio::test]
    async fn test_import_wotd_next_open_continues_log() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteWotdRepository::new(db.pool().clone());
        repo.insert(&WotdEntry::new(ymd(2024, 3, 3), "三")).await.unwrap();

        let report = import_wotd(&repo, words(&["四"]), StartDate::NextOpen, ymd(2030, 1, 1))
            .await
            .unwrap();
        assert_eq!(report.added, vec![WotdEntry::new(ymd(2024, 3, 4), "四")]);
    }

    #[tokio::test]
    async fn test_import_wotd_next_open_on_empty_log_uses_today() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteWotdRepository::new(db.pool().clone());

        let report = import_wotd(&repo, words(&["一"]), StartDate::NextOpen, ymd(2025, 7, 1))
            .await
            .unwrap();
        assert_eq!(report.added[0].date, ymd(2025, 7, 1));
    }

    #[tokio::test]
    async fn test_import_wotd_past_last_date_stores_nothing() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteWotdRepository::new(db.pool().clone());

        let err = import_wotd(
            &repo,
            words(&["一", "二"]),
            StartDate::On(NaiveDate::MAX),
            ymd(2030, 1, 1),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ImportError::Parse(ParseError::InvalidDate(_))));
        assert_eq!(repo.count_all().await.unwrap(), 0);

        let err = import_wotd(&repo, words(&["一"]), StartDate::Tomorrow, NaiveDate::MAX)
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::Parse(ParseError::InvalidDate(_))));
    }

    #[tokio::test]
    async fn test_import_dictionary_from_file() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteDictionaryRepository::new(db.pool().clone());
        repo.bulk_add(&[vocab::DictionaryTerm::new("你好")]).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.csv");
        std::fs::write(&path, "term,pinyin\n你好,ni3hao3\n谢谢,xie4xie5\n").unwrap();

        let report = import_dictionary(&repo, &path).await.unwrap();
        assert_eq!(report.added, vec!["谢谢".to_string()]);
        assert_eq!(report.skipped, vec!["你好".to_string()]);

        let xiexie = repo.find("谢谢").await.unwrap().unwrap();
        assert_eq!(xiexie.pinyin.as_deref(), Some("xièxie"));
    }

    #[tokio::test]
    async fn test_import_header_only_dictionary_reports_nothing() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteDictionaryRepository::new(db.pool().clone());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.csv");
        std::fs::write(&path, "term,pinyin,definition\n").unwrap();

        let report = import_dictionary(&repo, &path).await.unwrap();
        assert!(report.is_empty());
        assert_eq!(repo.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_import_dictionary_bad_input_is_parse_error() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = SqliteDictionaryRepository::new(db.pool().clone());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.csv");
        std::fs::write(&path, "word\n你好\n").unwrap();

        let err = import_dictionary(&repo, &path).await.unwrap_err();
        assert!(matches!(err, ImportError::Parse(ParseError::MissingTermColumn)));
        assert_eq!(repo.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_term_status_and_range() {
        let db = Database::new_in_memory().await.unwrap();
        let dict = SqliteDictionaryRepository::new(db.pool().clone());
        let wotd = SqliteWotdRepository::new(db.pool().clone());

        dict.bulk_add(&[vocab::DictionaryTerm::new("能力")]).await.unwrap();
        wotd.bulk_add(&[
            WotdEntry::new(ymd(2020, 3, 12), "能力"),
            WotdEntry::new(ymd(2020, 4, 1), "能力"),
        ])
        .await
        .unwrap();

        let status = term_status(&dict, &wotd, "能力").await.unwrap();
        assert!(status.in_dictionary);
        assert_eq!(status.wotd_count, 2);

        let unknown = term_status(&dict, &wotd, "没有").await.unwrap();
        assert!(!unknown.in_dictionary);
        assert_eq!(unknown.wotd_count, 0);

        let range = wotd_range(&wotd).await.unwrap();
        assert_eq!(
            range,
            WotdRange {
                first: Some(ymd(2020, 3, 12)),
                last: Some(ymd(2020, 4, 1)),
                total: 2,
            }
        );
    }
}
