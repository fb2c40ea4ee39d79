use thiserror::Error;

/// Everything that can go wrong reading the card and tile tables.
///
/// Any of these is fatal to building a `Catalog`; there is no partially
/// loaded catalog.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Unable to read {path}: {source}")]
    MissingSource {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{table} is empty")]
    EmptyTable { table: &'static str },
    #[error("{table} header is missing the `{column}` column")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("{table} line {line}: {reason}")]
    MalformedRow {
        table: &'static str,
        line: usize,
        reason: String,
    },
    #[error("{table} line {line}: unknown color code `{code}`")]
    UnknownColor {
        table: &'static str,
        line: usize,
        code: String,
    },
    #[error("{table} line {line}: tier must be 1, 2 or 3 but was {tier}")]
    InvalidTier {
        table: &'static str,
        line: usize,
        tier: u8,
    },
    #[error("{table} line {line}: duplicate id {id}")]
    DuplicateId {
        table: &'static str,
        line: usize,
        id: u16,
    },
}
