use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Read-only course metadata handed to the application form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseContext {
    pub id: String,
    pub title: String,
    pub fees: f64,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub last_date_to_apply: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

/// Course record as served by `GET /courses` and `GET /courses/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    pub fees: f64,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub last_date_to_apply: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub pdf_link: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Course {
    pub fn context(&self) -> CourseContext {
        CourseContext {
            id: self.id.clone(),
            title: self.title.clone(),
            fees: self.fees,
            start_date: self.start_date,
            last_date_to_apply: self.last_date_to_apply,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }

    pub fn accepting_applications(&self, today: NaiveDate) -> bool {
        today <= self.last_date_to_apply
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Narrowing applied to a course listing (category match and case-insensitive title search).
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl CourseFilter {
    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase);

        courses
            .iter()
            .filter(|course| match &self.category {
                Some(category) => course
                    .category
                    .as_deref()
                    .is_some_and(|value| value.eq_ignore_ascii_case(category)),
                None => true,
            })
            .filter(|course| match &needle {
                Some(needle) => course.title.to_lowercase().contains(needle),
                None => true,
            })
            .collect()
    }
}

/// In-memory catalog backing the reference collaborator.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    pub courses: Vec<Course>,
    pub categories: Vec<Category>,
}

impl CourseCatalog {
    /// Build a catalog from courses, deriving one category per distinct course category.
    pub fn from_courses(courses: Vec<Course>) -> Self {
        let mut categories: Vec<Category> = Vec::new();
        for name in courses.iter().filter_map(|course| course.category.as_deref()) {
            let id = category_slug(name);
            if !categories.iter().any(|category| category.id == id) {
                categories.push(Category {
                    id,
                    name: name.to_string(),
                });
            }
        }

        Self {
            courses,
            categories,
        }
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    /// Small catalog used when no CSV export is supplied.
    pub fn demo() -> Self {
        let created_at = Utc.with_ymd_and_hms(2024, 11, 1, 9, 0, 0).single();
        let course = |id: &str,
                      title: &str,
                      category: &str,
                      fees: f64,
                      start: (i32, u32, u32),
                      deadline: (i32, u32, u32),
                      times: (&str, &str)| Course {
            id: id.to_string(),
            title: title.to_string(),
            category: Some(category.to_string()),
            fees,
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap_or_default(),
            last_date_to_apply: NaiveDate::from_ymd_opt(deadline.0, deadline.1, deadline.2)
                .unwrap_or_default(),
            start_time: times.0.to_string(),
            end_time: times.1.to_string(),
            image: None,
            details: None,
            pdf_link: None,
            created_at,
        };

        Self::from_courses(vec![
            course(
                "web-101",
                "Full Stack Web Development",
                "Programming",
                5000.0,
                (2025, 1, 10),
                (2025, 1, 5),
                ("10:00", "14:30"),
            ),
            course(
                "data-201",
                "Data Analysis with Python",
                "Data Science",
                7500.0,
                (2025, 2, 3),
                (2025, 1, 27),
                ("09:30", "12:00"),
            ),
            course(
                "design-110",
                "UI/UX Design Foundations",
                "Design",
                4200.0,
                (2025, 1, 20),
                (2025, 1, 15),
                ("18:00", "20:00"),
            ),
        ])
    }
}

pub(crate) fn category_slug(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Accept either a bare `YYYY-MM-DD` date or a full RFC 3339 timestamp.
pub(crate) fn parse_calendar_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}
