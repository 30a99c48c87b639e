//! Confirmation document produced after the collaborator accepts an application.

pub mod format;
pub mod layout;
mod render;
mod sink;

pub use layout::{ConfirmationLayout, DetailLine};
pub use sink::{DirectorySink, DocumentSink, SavedDocument};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::workflows::catalog::CourseContext;
use crate::workflows::enrollment::domain::{ApplicationId, ApplicationInput};

/// Failure to produce or store the confirmation document. The application itself has
/// already been accepted remotely when this is raised.
#[derive(Debug, thiserror::Error)]
pub enum DocumentGenerationFailure {
    #[error("malformed {asset}: {reason}")]
    Asset { asset: &'static str, reason: String },
    #[error("course timing '{start} - {end}' is not in HH:MM format")]
    InvalidTime { start: String, end: String },
    #[error("pdf rendering failed: {0}")]
    Render(String),
    #[error("could not save document: {0}")]
    Io(#[from] std::io::Error),
}

/// Visual identity stamped on every confirmation document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub institute_name: String,
    pub tagline: String,
    /// `#RRGGBB`
    pub accent_color: String,
    pub logo_mark: String,
    pub currency: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            institute_name: "Skill Academy".to_string(),
            tagline: "Course Application Confirmation".to_string(),
            accent_color: "#1F4E79".to_string(),
            logo_mark: "SA".to_string(),
            currency: "INR".to_string(),
        }
    }
}

/// Rendered document ready to hand to a [`DocumentSink`].
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub file_name: String,
    pub layout: ConfirmationLayout,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentGenerator {
    branding: Branding,
}

impl DocumentGenerator {
    pub fn new(branding: Branding) -> Self {
        Self { branding }
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Generate the confirmation for today's date.
    pub fn generate_pdf(
        &self,
        application_id: &ApplicationId,
        input: &ApplicationInput,
        course: &CourseContext,
    ) -> Result<GeneratedDocument, DocumentGenerationFailure> {
        self.generate_pdf_dated(application_id, input, course, Local::now().date_naive())
    }

    pub fn generate_pdf_dated(
        &self,
        application_id: &ApplicationId,
        input: &ApplicationInput,
        course: &CourseContext,
        today: NaiveDate,
    ) -> Result<GeneratedDocument, DocumentGenerationFailure> {
        let layout = ConfirmationLayout::build(application_id, input, course, &self.branding, today)?;
        let bytes = render::render_pdf(&layout, &self.branding)?;

        Ok(GeneratedDocument {
            file_name: layout.file_name.clone(),
            layout,
            bytes,
        })
    }
}
