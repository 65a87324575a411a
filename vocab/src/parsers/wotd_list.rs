use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::dates::consecutive_from;
use crate::{ParseError, WotdEntry};

const BOM: char = '\u{feff}';

/// Read the words of a word-of-the-day list file.
pub fn read_wotd_words(path: &Path) -> Result<Vec<String>, ParseError> {
    let file = File::open(path)?;
    let words = parse_word_list(BufReader::new(file))?;
    debug!(path = %path.display(), count = words.len(), "Read word list");
    Ok(words)
}

/// One word per line, surrounding whitespace trimmed, blank lines skipped.
pub fn parse_word_list<R: BufRead>(input: R) -> Result<Vec<String>, ParseError> {
    let mut words = Vec::new();
    for line in input.lines() {
        let line = line?;
        let word = line.trim_start_matches(BOM).trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Give each word its own day, starting at `start`, in input order.
///
/// Fails with [`ParseError::InvalidDate`] naming the first word that would
/// fall past the end of the calendar.
pub fn assign_dates<I>(words: I, start: NaiveDate) -> Result<Vec<WotdEntry>, ParseError>
where
    I: IntoIterator<Item = String>,
{
    let mut dates = consecutive_from(start);
    words
        .into_iter()
        .map(|word| match dates.next() {
            Some(date) => Ok(WotdEntry { date, word }),
            None => Err(ParseError::InvalidDate(format!("no date left for {word:?}"))),
        })
        .collect()
}

/// Parse a word list and date it from `start`.
pub fn parse_wotd_list<R: BufRead>(input: R, start: NaiveDate) -> Result<Vec<WotdEntry>, ParseError> {
    assign_dates(parse_word_list(input)?, start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dates_follow_file_order() {
        let entries = parse_wotd_list("一\n二\n三\n".as_bytes(), ymd(2024, 3, 1)).unwrap();
        assert_eq!(
            entries,
            vec![
                WotdEntry::new(ymd(2024, 3, 1), "一"),
                WotdEntry::new(ymd(2024, 3, 2), "二"),
                WotdEntry::new(ymd(2024, 3, 3), "三"),
            ]
        );
    }

    #[test]
    fn trims_and_skips_blank_lines() {
        let words = parse_word_list("\u{feff}能力 \r\n\n  \n 学习\n".as_bytes()).unwrap();
        assert_eq!(words, vec!["能力".to_string(), "学习".to_string()]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_wotd_list("".as_bytes(), ymd(2024, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn reads_words_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wotd.txt");
        std::fs::write(&path, "你好\n谢谢\n").unwrap();

        let words = read_wotd_words(&path).unwrap();
        let entries = assign_dates(words, ymd(2023, 12, 31)).unwrap();
        assert_eq!(entries[1], WotdEntry::new(ymd(2024, 1, 1), "谢谢"));
    }

    #[test]
    fn words_past_the_last_date_are_an_error() {
        let last = NaiveDate::MAX;
        let one = assign_dates(vec!["一".to_string()], last).unwrap();
        assert_eq!(one, vec![WotdEntry::new(last, "一")]);

        let err = assign_dates(vec!["一".to_string(), "二".to_string()], last).unwrap_err();
        assert!(matches!(err, ParseError::InvalidDate(ref msg) if msg.contains('二')));
    }
}
