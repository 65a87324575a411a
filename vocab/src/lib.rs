//! Vocabulary records and the parsers that produce them from bulk input.

pub mod dates;
pub mod error;
pub mod parsers;
pub mod pinyin;
pub mod types;

pub use dates::StartDate;
pub use error::ParseError;
pub use parsers::{
    assign_dates, parse_dictionary_csv, parse_word_list, parse_wotd_list, read_dictionary_csv,
    read_wotd_words,
};
pub use types::{BulkAddReport, DictionaryTerm, WotdEntry};
