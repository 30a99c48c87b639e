//! Course catalog: wire types, the read-side HTTP client, and CSV import for the
//! reference collaborator.

mod client;
mod domain;
mod import;

pub use client::CatalogClient;
pub use domain::{Category, Course, CourseCatalog, CourseContext, CourseFilter};

use std::io::Read;
use std::path::Path;

/// Errors raised while talking to the catalog endpoints.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("catalog server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        line: usize,
        field: &'static str,
        reason: String,
    },
    Empty,
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read course export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid course CSV data: {}", err),
            CatalogImportError::InvalidField {
                line,
                field,
                reason,
            } => write!(f, "line {line}: invalid {field}: {reason}"),
            CatalogImportError::Empty => write!(f, "course export contains no courses"),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidField { .. } | CatalogImportError::Empty => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CourseCatalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CourseCatalog, CatalogImportError> {
        import::catalog_from_reader(reader)
    }
}
