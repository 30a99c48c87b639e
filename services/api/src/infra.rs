use course_enroll::error::AppError;
use course_enroll::workflows::catalog::{CatalogImporter, CourseCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog served by the reference API: a CSV export when given, the demo catalog otherwise.
pub(crate) fn load_catalog(courses_csv: Option<&Path>) -> Result<CourseCatalog, AppError> {
    match courses_csv {
        Some(path) => Ok(CatalogImporter::from_path(path)?),
        None => Ok(CourseCatalog::demo()),
    }
}
