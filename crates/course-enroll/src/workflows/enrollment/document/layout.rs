use chrono::NaiveDate;

use super::format::{format_date, format_fees, format_timing};
use super::{Branding, DocumentGenerationFailure};
use crate::workflows::catalog::CourseContext;
use crate::workflows::enrollment::domain::{ApplicationId, ApplicationInput};

pub const DETAILS_HEADING: &str = "Application Details";
pub const INSTRUCTIONS_HEADING: &str = "Important Instructions";

pub const INSTRUCTIONS: [&str; 5] = [
    "1. Please pay the course fee before the last date to apply to confirm your seat.",
    "2. Our team will contact you within 2 working days on the phone number provided.",
    "3. Keep this Application ID safe and quote it in all future communication.",
    "4. You can check the status of your application anytime using your Application ID.",
    "5. For any queries, please visit the Help section on our website.",
];

/// One `Label: value` row of the details section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

impl DetailLine {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }

    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Text content of the confirmation page, independent of the PDF backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationLayout {
    pub title: String,
    pub subtitle: String,
    pub logo_mark: String,
    pub details: Vec<DetailLine>,
    pub instructions: Vec<&'static str>,
    pub file_name: String,
}

impl ConfirmationLayout {
    pub fn build(
        application_id: &ApplicationId,
        input: &ApplicationInput,
        course: &CourseContext,
        branding: &Branding,
        today: NaiveDate,
    ) -> Result<Self, DocumentGenerationFailure> {
        let timing = format_timing(&course.start_time, &course.end_time).ok_or_else(|| {
            DocumentGenerationFailure::InvalidTime {
                start: course.start_time.clone(),
                end: course.end_time.clone(),
            }
        })?;

        let email = if input.email.trim().is_empty() {
            "N/A".to_string()
        } else {
            input.email.clone()
        };

        let details = vec![
            DetailLine::new("Application ID", application_id.as_str()),
            DetailLine::new("Course Name", course.title.as_str()),
            DetailLine::new("Course Fee", format_fees(course.fees, &branding.currency)),
            DetailLine::new("Start Date", format_date(course.start_date)),
            DetailLine::new("Timing", timing),
            DetailLine::new("Last Date to Apply", format_date(course.last_date_to_apply)),
            DetailLine::new("Name", input.name.as_str()),
            DetailLine::new("Email", email),
            DetailLine::new("Phone", input.phone.as_str()),
            DetailLine::new("Age", input.age.as_str()),
            DetailLine::new("Address", input.address.as_str()),
            DetailLine::new("City", input.city.as_str()),
            DetailLine::new("State", input.state.as_str()),
            DetailLine::new("Pincode", input.pincode.as_str()),
            DetailLine::new("Application Date", format_date(today)),
        ];

        Ok(Self {
            title: branding.institute_name.clone(),
            subtitle: branding.tagline.clone(),
            logo_mark: branding.logo_mark.clone(),
            details,
            instructions: INSTRUCTIONS.to_vec(),
            file_name: document_file_name(&input.name),
        })
    }

    /// Every line of text on the page, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.logo_mark.clone(),
            self.title.clone(),
            self.subtitle.clone(),
            DETAILS_HEADING.to_string(),
        ];
        lines.extend(self.details.iter().map(DetailLine::text));
        lines.push(INSTRUCTIONS_HEADING.to_string());
        lines.extend(self.instructions.iter().map(|line| line.to_string()));
        lines
    }

    pub fn detail(&self, label: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

pub fn document_file_name(applicant_name: &str) -> String {
    format!("{applicant_name}_CourseApplication.pdf")
}
