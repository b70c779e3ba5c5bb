use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("no usable name column (expected `{expected}`, found {found:?})")]
    MissingColumn {
        expected: &'static str,
        found: Vec<String>,
    },
    #[error("invalid family name: {0:?}")]
    InvalidName(String),
    #[error("refusing to clear the dataset without confirmation")]
    ConfirmationRequired,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("export io error: {0}")]
    Io(#[from] std::io::Error),
}
