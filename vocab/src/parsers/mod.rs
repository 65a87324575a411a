//! Bulk-input parsers.
//!
//! | Input | Parser | Output |
//! |-------|--------|--------|
//! | dictionary CSV with a header row | [`parse_dictionary_csv`] | `Vec<DictionaryTerm>` |
//! | word list, one word per line | [`parse_wotd_list`] | `Vec<WotdEntry>` |

mod dictionary_csv;
mod wotd_list;

pub use dictionary_csv::{parse_dictionary_csv, read_dictionary_csv};
pub use wotd_list::{assign_dates, parse_word_list, parse_wotd_list, read_wotd_words};
