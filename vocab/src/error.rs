/// Errors raised while turning bulk input into records.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("header row has no `term` column")]
    MissingTermColumn,
    #[error("line {line}: term is empty")]
    EmptyTerm { line: u64 },
    #[error("line {line}: invalid HSK level {value:?}")]
    InvalidHsk { line: u64, value: String },
    #[error("unrecognized date: {0:?}")]
    InvalidDate(String),
}
