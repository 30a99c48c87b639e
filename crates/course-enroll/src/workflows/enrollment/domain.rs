use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::catalog::CourseContext;

/// Six-digit application reference shown to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw form state as typed by the applicant. `Default` is the empty form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInput {
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub age: String,
}

impl ApplicationInput {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Phone => self.phone = value,
            FormField::Address => self.address = value,
            FormField::City => self.city = value,
            FormField::State => self.state = value,
            FormField::Pincode => self.pincode = value,
            FormField::Age => self.age = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Editable fields of the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Address,
    City,
    State,
    Pincode,
    Age,
}

/// Frozen application record submitted to the remote collaborator.
///
/// Fields are private so a constructed record cannot drift between the remote
/// submission and document generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    application_id: ApplicationId,
    course_id: String,
    course_name: String,
    course_fees: f64,
    name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    state: String,
    pincode: String,
    age: String,
    application_date: DateTime<Utc>,
}

impl Application {
    pub fn assemble(
        application_id: ApplicationId,
        input: &ApplicationInput,
        course: &CourseContext,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            application_id,
            course_id: course.id.clone(),
            course_name: course.title.clone(),
            course_fees: course.fees,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            address: input.address.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            pincode: input.pincode.clone(),
            age: input.age.clone(),
            application_date: submitted_at,
        }
    }

    pub fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn course_name(&self) -> &str {
        &self.course_name
    }

    pub fn course_fees(&self) -> f64 {
        self.course_fees
    }

    pub fn applicant_name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn application_date(&self) -> DateTime<Utc> {
        self.application_date
    }

    /// The applicant-entered portion of the record.
    pub fn input(&self) -> ApplicationInput {
        ApplicationInput {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            pincode: self.pincode.clone(),
            age: self.age.clone(),
        }
    }
}
