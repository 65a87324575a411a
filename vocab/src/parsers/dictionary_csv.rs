use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::pinyin;
use crate::{DictionaryTerm, ParseError};

/// Header columns with a dedicated slot in [`DictionaryTerm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Term,
    Pinyin,
    Definition,
    Traditional,
    Hsk,
    Other,
}

impl Column {
    fn from_header(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "term" => Self::Term,
            "pinyin" => Self::Pinyin,
            "definition" => Self::Definition,
            "traditional" => Self::Traditional,
            "hsk" => Self::Hsk,
            _ => Self::Other,
        }
    }
}

/// Parse the dictionary CSV at `path`.
pub fn read_dictionary_csv(path: &Path) -> Result<Vec<DictionaryTerm>, ParseError> {
    let file = File::open(path)?;
    let terms = parse_dictionary_csv(file)?;
    debug!(path = %path.display(), count = terms.len(), "Parsed dictionary CSV");
    Ok(terms)
}

/// Parse dictionary CSV text.
///
/// The first row names the columns. `pinyin` values are normalized to
/// diacritics, a blank `hsk` becomes `0`, other blank optionals become `None`.
/// Known fields are trimmed; columns the dictionary does not know are kept
/// verbatim in [`DictionaryTerm::extra`]. Rows may be shorter than the header; missing trailing fields read as blank.
pub fn parse_dictionary_csv<R: Read>(input: R) -> Result<Vec<DictionaryTerm>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let columns: Vec<Column> = headers.iter().map(Column::from_header).collect();
    if !columns.contains(&Column::Term) {
        return Err(ParseError::MissingTermColumn);
    }

    let mut terms = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        terms.push(term_from_record(&headers, &columns, &record, line)?);
    }

    Ok(terms)
}

fn term_from_record(
    headers: &StringRecord,
    columns: &[Column],
    record: &StringRecord,
    line: u64,
) -> Result<DictionaryTerm, ParseError> {
    let mut term = DictionaryTerm::default();

    for (i, column) in columns.iter().enumerate() {
        let raw = record.get(i).unwrap_or_default();
        let value = raw.trim();
        match column {
            Column::Term => term.term = value.to_string(),
            Column::Pinyin => term.pinyin = non_empty(value).map(pinyin::normalize),
            Column::Definition => term.definition = non_empty(value).map(str::to_string),
            Column::Traditional => term.traditional = non_empty(value).map(str::to_string),
            Column::Hsk => term.hsk = Some(parse_hsk(value, line)?),
            Column::Other => {
                term.extra.insert(headers[i].to_string(), raw.to_string());
            }
        }
    }

    if term.term.is_empty() {
        return Err(ParseError::EmptyTerm { line });
    }
    Ok(term)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn parse_hsk(value: &str, line: u64) -> Result<u8, ParseError> {
    if value.is_empty() {
        return Ok(0);
    }
    value.parse().map_err(|_| ParseError::InvalidHsk {
        line,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> Result<Vec<DictionaryTerm>, ParseError> {
        parse_dictionary_csv(text.as_bytes())
    }

    #[test]
    fn blank_hsk_defaults_to_zero_and_pinyin_is_normalized() {
        let terms = parse("term,pinyin,hsk\n学习,xue2 xi2,\n").unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].term, "学习");
        assert_eq!(terms[0].pinyin.as_deref(), Some("xué xí"));
        assert_eq!(terms[0].hsk, Some(0));
    }

    #[test]
    fn columns_are_matched_by_name() {
        let terms =
            parse("hsk,definition,term,traditional,pinyin\n3,to study,学习,學習,xue2xi2\n").unwrap();
        let t = &terms[0];
        assert_eq!(t.term, "学习");
        assert_eq!(t.pinyin.as_deref(), Some("xuéxí"));
        assert_eq!(t.definition.as_deref(), Some("to study"));
        assert_eq!(t.traditional.as_deref(), Some("學習"));
        assert_eq!(t.hsk, Some(3));
    }

    #[test]
    fn unknown_columns_pass_through() {
        let terms = parse("term,notes\n谢谢,\"polite, common\"\n").unwrap();
        assert_eq!(terms[0].extra.get("notes").map(String::as_str), Some("polite, common"));
        assert_eq!(terms[0].hsk, None);
        assert_eq!(terms[0].pinyin, None);
    }

    #[test]
    fn unknown_column_values_keep_whitespace() {
        let terms = parse("term , definition, notes\n 谢谢 , thanks ,  see p. 12 \n").unwrap();
        assert_eq!(terms[0].term, "谢谢");
        assert_eq!(terms[0].definition.as_deref(), Some("thanks"));
        assert_eq!(terms[0].extra.get("notes").map(String::as_str), Some("  see p. 12 "));
    }

    #[test]
    fn short_rows_read_as_blank() {
        let terms = parse("term,pinyin,definition\n你好,ni3hao3\n").unwrap();
        assert_eq!(terms[0].pinyin.as_deref(), Some("nǐhǎo"));
        assert_eq!(terms[0].definition, None);
    }

    #[test]
    fn rows_keep_file_order_and_skip_blank_rows() {
        let terms = parse("term\n一\n,\n二\n三\n").unwrap();
        let names: Vec<_> = terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["一", "二", "三"]);
    }

    #[test]
    fn header_without_term_is_rejected() {
        let err = parse("word,pinyin\n学习,xue2xi2\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingTermColumn));
    }

    #[test]
    fn empty_term_is_rejected_with_line() {
        let err = parse("term,pinyin\n学习,xue2xi2\n,ni3\n").unwrap_err();
        assert!(matches!(err, ParseError::EmptyTerm { line: 3 }), "got {err:?}");
    }

    #[test]
    fn invalid_hsk_is_rejected() {
        let err = parse("term,hsk\n学习,four\n").unwrap_err();
        assert!(
            matches!(err, ParseError::InvalidHsk { line: 2, ref value } if value == "four"),
            "got {err:?}"
        );
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "term,pinyin,definition,hsk").unwrap();
        writeln!(file, "能力,neng2li4,ability,5").unwrap();
        drop(file);

        let terms = read_dictionary_csv(&path).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].pinyin.as_deref(), Some("nénglì"));
        assert_eq!(terms[0].hsk, Some(5));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_dictionary_csv(Path::new("/nonexistent/dictionary.csv")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
