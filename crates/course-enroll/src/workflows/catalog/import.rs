use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::domain::{parse_calendar_date, Course, CourseCatalog};
use super::CatalogImportError;

pub(crate) fn parse_courses<R: Read>(reader: R) -> Result<Vec<Course>, CatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut courses = Vec::new();

    for (index, record) in csv_reader.deserialize::<CourseRow>().enumerate() {
        let row = record?;
        // header occupies line 1
        let line = index + 2;
        courses.push(row.into_course(line)?);
    }

    Ok(courses)
}

pub(crate) fn catalog_from_reader<R: Read>(reader: R) -> Result<CourseCatalog, CatalogImportError> {
    let courses = parse_courses(reader)?;
    if courses.is_empty() {
        return Err(CatalogImportError::Empty);
    }
    Ok(CourseCatalog::from_courses(courses))
}

#[derive(Debug, Deserialize)]
struct CourseRow {
    id: String,
    title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    fees: f64,
    start_date: String,
    last_date_to_apply: String,
    start_time: String,
    end_time: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    image: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    details: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pdf_link: Option<String>,
}

impl CourseRow {
    fn into_course(self, line: usize) -> Result<Course, CatalogImportError> {
        let start_date = parse_row_date(&self.start_date, "start_date", line)?;
        let last_date_to_apply = parse_row_date(&self.last_date_to_apply, "last_date_to_apply", line)?;

        Ok(Course {
            id: self.id,
            title: self.title,
            category: self.category,
            fees: self.fees,
            start_date,
            last_date_to_apply,
            start_time: self.start_time,
            end_time: self.end_time,
            image: self.image,
            details: self.details,
            pdf_link: self.pdf_link,
            created_at: None,
        })
    }
}

fn parse_row_date(
    raw: &str,
    field: &'static str,
    line: usize,
) -> Result<NaiveDate, CatalogImportError> {
    parse_calendar_date(raw).map_err(|reason| CatalogImportError::InvalidField {
        line,
        field,
        reason,
    })
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}
