// crates/core/src/error.rs
use std::path::PathBuf;

use jobtrack_types::ParseLabelError;
use thiserror::Error;

use crate::filter::SearchField;

/// Errors building a local search query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Unknown search field: {0}")]
    UnknownField(String),

    #[error("Unknown sort column: {0}")]
    UnknownSortColumn(String),

    #[error("Invalid {field} filter: {source}")]
    Label {
        field: SearchField,
        #[source]
        source: ParseLabelError,
    },
}

/// Errors reading, writing or mutating the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record title cannot be empty")]
    EmptyTitle,

    #[error("A record for '{title}' at '{company}' already exists")]
    Duplicate { title: String, company: String },

    #[error("No record for '{title}' at '{company}'")]
    NotFound { title: String, company: String },

    #[error("Unsupported résumé file '{file}': allowed formats are PDF, DOC, DOCX, TXT, RTF")]
    UnsupportedResume { file: String },

    #[error("Permission denied accessing record file: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("IO error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in record file {path}: {message}")]
    MalformedJson { path: PathBuf, message: String },

    #[error("Failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    pub(crate) fn not_found(title: &str, company: &str) -> Self {
        Self::NotFound {
            title: title.to_string(),
            company: company.to_string(),
        }
    }

    pub(crate) fn duplicate(title: &str, company: &str) -> Self {
        Self::Duplicate {
            title: title.to_string(),
            company: company.to_string(),
        }
    }
}

/// Errors loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No Jooble API key configured (set JOBTRACK_API_KEY or apiKey in {path})")]
    MissingApiKey { path: PathBuf },

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("IO error reading settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in settings {path}: {message}")]
    MalformedJson { path: PathBuf, message: String },
}
