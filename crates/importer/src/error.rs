use crate::files::DatedFile;
use models::course::CatalogKey;
use sea_orm::DbErr;
use std::{path::PathBuf, process::ExitCode};
use thiserror::Error;

/// Everything that ends an import run
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("*** FILE DATES DO NOT MATCH ***{}", list_files(.0))]
    FileDateMismatch(Vec<DatedFile>),

    #[error("No {prefix} extract in {}", .dir.display())]
    MissingExtract { dir: PathBuf, prefix: String },

    #[error("Lookup of {key} returned {count} rows")]
    AmbiguousLookup { key: CatalogKey, count: usize },

    #[error("Inconsistent hours/credits/component for {key}")]
    Inconsistent { key: CatalogKey },

    #[error("Line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("Exclusion list: {0}")]
    ExclusionList(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ImportError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Inconsistent { .. } | Self::AmbiguousLookup { .. } => ExitCode::from(3),
            Self::FileDateMismatch(_) => ExitCode::from(4),
            _ => ExitCode::FAILURE,
        }
    }
}

fn list_files(files: &[DatedFile]) -> String {
    files.iter().map(|file| format!("\n  {file}")).collect()
}

/// Reasons `check-query-sizes` rejects a new set of extracts
#[derive(Error, Debug)]
pub enum QuerySizeError {
    #[error("No new query for {0}")]
    Missing(String),

    #[error("{count} matches for {name}")]
    Ambiguous { name: String, count: usize },

    #[error("{0} has zero bytes")]
    Empty(String),

    #[error("{new} ({new_size}) differs from {previous} ({previous_size}) by more than 10%")]
    SizeChanged {
        new: String,
        new_size: u64,
        previous: String,
        previous_size: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
