use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single word of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WotdEntry {
    pub date: NaiveDate,
    pub word: String,
}

impl WotdEntry {
    pub fn new(date: NaiveDate, word: impl Into<String>) -> Self {
        Self {
            date,
            word: word.into(),
        }
    }
}

/// A dictionary record keyed by its simplified form.
///
/// Optional fields use `None` as the empty marker. `extra` carries input
/// columns the dictionary table has no slot for, verbatim and keyed by
/// header name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryTerm {
    pub term: String,
    pub pinyin: Option<String>,
    pub definition: Option<String>,
    pub traditional: Option<String>,
    pub hsk: Option<u8>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl DictionaryTerm {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Default::default()
        }
    }
}

/// Per-item outcome of a bulk insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkAddReport<K> {
    pub added: Vec<K>,
    pub skipped: Vec<K>,
}

impl<K> BulkAddReport<K> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.skipped.is_empty()
    }
}

impl<K> Default for BulkAddReport<K> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_term_has_empty_optionals() {
        let t = DictionaryTerm::new("能力");
        assert_eq!(t.term, "能力");
        assert!(t.pinyin.is_none());
        assert!(t.definition.is_none());
        assert!(t.traditional.is_none());
        assert!(t.hsk.is_none());
        assert!(t.extra.is_empty());
    }

    #[test]
    fn default_report_is_empty() {
        let report: BulkAddReport<String> = BulkAddReport::default();
        assert!(report.is_empty());
    }
}
