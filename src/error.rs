use thiserror::Error;

/// A data-shape problem found while deriving a summary from the table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("missing column '{column}'")]
    MissingColumn { column: String },

    #[error("column '{column}', row {row}: cannot read '{value}' as {expected}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },

    #[error("column '{column}' has {found} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        found: usize,
        expected: usize,
    },
}

impl DataError {
    pub(crate) fn missing(column: &str) -> Self {
        DataError::MissingColumn {
            column: column.to_string(),
        }
    }
}
