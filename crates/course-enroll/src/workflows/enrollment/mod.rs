//! Application submission: validation, numbering, remote intake, and the confirmation
//! document handed back to the applicant.

pub mod document;
pub mod domain;
pub mod form;
pub mod gateway;
pub mod identifier;
pub mod pipeline;
pub mod validation;

#[cfg(test)]
mod tests;

pub use document::{
    Branding, ConfirmationLayout, DirectorySink, DocumentGenerationFailure, DocumentGenerator,
    DocumentSink, GeneratedDocument, SavedDocument,
};
pub use domain::{Application, ApplicationId, ApplicationInput, FormField};
pub use form::{EnrollmentForm, FormSubmitResult, FormView, HeadlessView, Notification};
pub use gateway::{ApplicationGateway, HttpApplicationGateway, RemoteFailure, SubmissionReceipt};
pub use identifier::{ApplicationIdSource, RandomApplicationIds};
pub use pipeline::{SubmissionOutcome, SubmissionPipeline};
pub use validation::{validate, ValidationError};
