//! Error types for taxonomy construction and source loading.

use thiserror::Error;

/// A jurisdiction abbreviation outside the fixed 56-entry table.
///
/// Fatal to a taxonomy build: no partial taxonomy is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized jurisdiction '{abbr}'{}", record_suffix(.record_id))]
pub struct InvalidJurisdictionError {
    pub abbr: String,
    /// Id of the location record that carried the abbreviation, if any.
    pub record_id: Option<String>,
}

impl InvalidJurisdictionError {
    pub fn new(abbr: impl Into<String>) -> Self {
        Self {
            abbr: abbr.into(),
            record_id: None,
        }
    }

    pub fn for_record(abbr: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            abbr: abbr.into(),
            record_id: Some(record_id.into()),
        }
    }
}

fn record_suffix(record_id: &Option<String>) -> String {
    match record_id {
        Some(id) => format!(" on location record '{id}'"),
        None => String::new(),
    }
}

/// Problems with the category set as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("category slug '{0}' is not URL-safe")]
    InvalidCategorySlug(String),

    #[error("duplicate category slug '{0}'")]
    DuplicateCategorySlug(String),

    #[error("category '{slug}' references unknown parent '{parent}'")]
    UnknownParentCategory { slug: String, parent: String },
}

/// Errors raised while reading raw records and building a snapshot.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        source: csv::Error,
    },

    #[error("malformed record in {path} at line {line}: {reason}")]
    Malformed {
        path: String,
        line: u64,
        reason: String,
    },

    #[error(transparent)]
    Jurisdiction(#[from] InvalidJurisdictionError),

    #[error(transparent)]
    Category(#[from] CategoryError),
}
