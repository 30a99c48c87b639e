use crate::catalog::catalog_client;
use chrono::Local;
use clap::Args;
use course_enroll::error::AppError;
use course_enroll::telemetry;
use course_enroll::workflows::enrollment::{
    DirectorySink, DocumentGenerator, EnrollmentForm, FormField, FormSubmitResult, HeadlessView,
    HttpApplicationGateway, Notification, SubmissionOutcome, SubmissionPipeline,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug, Default)]
pub(crate) struct ApplyArgs {
    /// Course to apply for
    #[arg(long)]
    pub(crate) course_id: String,
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long, default_value = "")]
    pub(crate) email: String,
    /// 10 digit phone number
    #[arg(long)]
    pub(crate) phone: String,
    #[arg(long)]
    pub(crate) address: String,
    #[arg(long)]
    pub(crate) city: String,
    #[arg(long)]
    pub(crate) state: String,
    /// 6 digit pincode
    #[arg(long)]
    pub(crate) pincode: String,
    #[arg(long)]
    pub(crate) age: String,
    /// Where to save the confirmation document (defaults to ENROLL_OUTPUT_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
}

impl ApplyArgs {
    fn fields(&self) -> [(FormField, &str); 8] {
        [
            (FormField::Name, self.name.as_str()),
            (FormField::Email, self.email.as_str()),
            (FormField::Phone, self.phone.as_str()),
            (FormField::Address, self.address.as_str()),
            (FormField::City, self.city.as_str()),
            (FormField::State, self.state.as_str()),
            (FormField::Pincode, self.pincode.as_str()),
            (FormField::Age, self.age.as_str()),
        ]
    }
}

pub(crate) async fn run_apply(api_url: Option<String>, args: ApplyArgs) -> Result<(), AppError> {
    let (config, client) = catalog_client(api_url)?;
    telemetry::init(&config.telemetry)?;

    let course = client.get_course(&args.course_id).await?;
    if !course.accepting_applications(Local::now().date_naive()) {
        warn!(
            course_id = %course.id,
            last_date_to_apply = %course.last_date_to_apply,
            "applying after the last date to apply"
        );
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.enrollment.output_dir.clone());
    let pipeline = SubmissionPipeline::new(
        Arc::new(HttpApplicationGateway::new(
            config.enrollment.api_base_url.clone(),
        )),
        Arc::new(DirectorySink::new(output_dir)),
        DocumentGenerator::new(config.enrollment.branding.clone()),
    );

    let form = EnrollmentForm::new(Arc::new(pipeline), Arc::new(HeadlessView));
    for (field, value) in args.fields() {
        form.set_field(field, value);
    }

    let outcome = match form.submit(&course.context()).await {
        FormSubmitResult::Completed(outcome) => outcome,
        FormSubmitResult::Busy => {
            return Err(AppError::Submission(
                "another submission is still in progress".to_string(),
            ))
        }
    };

    let (lines, error) = summarize(&outcome, form.notification(), form.error());
    for line in lines {
        println!("{line}");
    }
    match error {
        Some(message) => Err(AppError::Submission(message)),
        None => Ok(()),
    }
}

/// Lines to print for a finished submission plus the error to exit with, if any.
fn summarize(
    outcome: &SubmissionOutcome,
    notification: Option<Notification>,
    error: Option<String>,
) -> (Vec<String>, Option<String>) {
    let mut lines = Vec::new();
    if let Some(notification) = notification {
        lines.push(notification.message);
    }
    if let SubmissionOutcome::Accepted { document, .. } = outcome {
        lines.push(format!(
            "Confirmation saved to {} ({} bytes)",
            document.location.display(),
            document.size_bytes
        ));
    }
    (lines, error)
}
