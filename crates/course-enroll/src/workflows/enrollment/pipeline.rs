use std::sync::Arc;

use chrono::{Local, Utc};
use tracing::{debug, info, warn};

use super::document::{DocumentGenerationFailure, DocumentGenerator, DocumentSink, SavedDocument};
use super::domain::{Application, ApplicationInput};
use super::gateway::{ApplicationGateway, RemoteFailure};
use super::identifier::{ApplicationIdSource, RandomApplicationIds};
use super::validation::{validate, ValidationError};
use crate::workflows::catalog::CourseContext;

/// Result of one pass through the submission pipeline. Every failure is captured
/// here; the pipeline never returns an error.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Blocked before contacting the collaborator.
    Invalid(ValidationError),
    /// The collaborator did not accept the application. Input should be kept for a retry.
    RemoteRejected {
        application: Application,
        failure: RemoteFailure,
    },
    /// Accepted remotely and the confirmation document was delivered.
    Accepted {
        application: Application,
        document: SavedDocument,
    },
    /// Accepted remotely, but the local confirmation could not be produced.
    DocumentFailed {
        application: Application,
        failure: DocumentGenerationFailure,
    },
}

impl SubmissionOutcome {
    pub fn application(&self) -> Option<&Application> {
        match self {
            SubmissionOutcome::Invalid(_) => None,
            SubmissionOutcome::RemoteRejected { application, .. }
            | SubmissionOutcome::Accepted { application, .. }
            | SubmissionOutcome::DocumentFailed { application, .. } => Some(application),
        }
    }

    /// Whether the collaborator now holds this application.
    pub fn remote_accepted(&self) -> bool {
        matches!(
            self,
            SubmissionOutcome::Accepted { .. } | SubmissionOutcome::DocumentFailed { .. }
        )
    }
}

/// Validate, number, submit, and confirm a single application.
pub struct SubmissionPipeline<G, S> {
    gateway: Arc<G>,
    sink: Arc<S>,
    documents: DocumentGenerator,
    ids: Arc<dyn ApplicationIdSource>,
}

impl<G, S> SubmissionPipeline<G, S>
where
    G: ApplicationGateway + 'static,
    S: DocumentSink + 'static,
{
    pub fn new(gateway: Arc<G>, sink: Arc<S>, documents: DocumentGenerator) -> Self {
        Self {
            gateway,
            sink,
            documents,
            ids: Arc::new(RandomApplicationIds),
        }
    }

    pub fn with_id_source(mut self, ids: Arc<dyn ApplicationIdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn documents(&self) -> &DocumentGenerator {
        &self.documents
    }

    pub async fn submit(&self, input: ApplicationInput, course: &CourseContext) -> SubmissionOutcome {
        if let Err(error) = validate(&input) {
            debug!(%error, course_id = %course.id, "application failed validation");
            return SubmissionOutcome::Invalid(error);
        }

        let application_id = self.ids.next_id();
        let application = Application::assemble(application_id.clone(), &input, course, Utc::now());

        if let Err(failure) = self.gateway.submit(&application).await {
            warn!(
                application_id = %application_id,
                course_id = %course.id,
                error = %failure,
                "collaborator did not accept application"
            );
            return SubmissionOutcome::RemoteRejected {
                application,
                failure,
            };
        }

        info!(
            application_id = %application_id,
            course_id = %course.id,
            "application accepted"
        );

        let today = application.application_date().with_timezone(&Local).date_naive();
        let delivered = self
            .documents
            .generate_pdf_dated(&application_id, &input, course, today)
            .and_then(|document| self.sink.deliver(&document));

        match delivered {
            Ok(document) => {
                info!(
                    application_id = %application_id,
                    location = %document.location.display(),
                    "confirmation document saved"
                );
                SubmissionOutcome::Accepted {
                    application,
                    document,
                }
            }
            Err(failure) => {
                warn!(
                    application_id = %application_id,
                    error = %failure,
                    "application accepted but confirmation document failed"
                );
                SubmissionOutcome::DocumentFailed {
                    application,
                    failure,
                }
            }
        }
    }
}
