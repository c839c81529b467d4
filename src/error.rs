use std::path::PathBuf;

use thiserror::Error;

/// Structural misuse of an edit. Numeric text is never validated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("unknown field `{field}` for {target}")]
    UnknownField { target: &'static str, field: String },

    #[error("row {index} is out of range for {target} ({len} rows)")]
    RowOutOfRange {
        target: &'static str,
        index: usize,
        len: usize,
    },

    #[error("row template does not belong to {target}")]
    TemplateMismatch { target: &'static str },

    #[error("`{value}` is not a valid {field} (choose one of: {options})")]
    InvalidOption {
        field: &'static str,
        value: String,
        options: String,
    },

    #[error("{target} must keep at least one row")]
    LastRow { target: &'static str },

    #[error("unknown list `{0}`")]
    UnknownList(String),
}

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON file: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{command}` needs {what}")]
    Missing {
        command: &'static str,
        what: &'static str,
    },

    #[error("`{value}` is not a valid {what}")]
    Invalid { what: &'static str, value: String },
}
