use chrono::Local;
use clap::Args;
use course_enroll::config::AppConfig;
use course_enroll::error::AppError;
use course_enroll::workflows::catalog::{CatalogClient, Course, CourseFilter};
use course_enroll::workflows::enrollment::document::format::{
    format_date, format_fees, format_timing,
};

#[derive(Args, Debug, Default)]
pub(crate) struct CourseListArgs {
    /// Only show courses in this category (case-insensitive)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Only show courses whose title contains this text
    #[arg(long)]
    pub(crate) search: Option<String>,
}

/// Load configuration and build a catalog client, honoring a command-line URL override.
pub(crate) fn catalog_client(api_url: Option<String>) -> Result<(AppConfig, CatalogClient), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(url) = api_url {
        config.enrollment.api_base_url = url.trim_end_matches('/').to_string();
    }
    let client = CatalogClient::new(config.enrollment.api_base_url.clone());
    Ok((config, client))
}

pub(crate) async fn run_course_list(
    api_url: Option<String>,
    args: CourseListArgs,
) -> Result<(), AppError> {
    let (config, client) = catalog_client(api_url)?;
    let courses = client.list_courses().await?;
    let filter = CourseFilter {
        category: args.category,
        search: args.search,
    };

    let matching = filter.apply(&courses);
    if matching.is_empty() {
        println!("No courses match the given filters.");
        return Ok(());
    }

    let currency = &config.enrollment.branding.currency;
    for course in matching {
        println!("{}", course_summary_line(course, currency));
    }
    Ok(())
}

pub(crate) async fn run_course_show(api_url: Option<String>, id: &str) -> Result<(), AppError> {
    let (config, client) = catalog_client(api_url)?;
    let course = client.get_course(id).await?;
    for line in course_detail_lines(&course, &config.enrollment.branding.currency) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) async fn run_categories(api_url: Option<String>) -> Result<(), AppError> {
    let (_, client) = catalog_client(api_url)?;
    let categories = client.list_categories().await?;
    if categories.is_empty() {
        println!("No categories published.");
    }
    for category in categories {
        println!("{:<20} {}", category.id, category.name);
    }
    Ok(())
}

pub(crate) fn course_summary_line(course: &Course, currency: &str) -> String {
    format!(
        "{:<12} {:<36} {:<14} {:>14}  starts {}",
        course.id,
        course.title,
        course.category.as_deref().unwrap_or("-"),
        format_fees(course.fees, currency),
        format_date(course.start_date),
    )
}

pub(crate) fn course_detail_lines(course: &Course, currency: &str) -> Vec<String> {
    let timing = format_timing(&course.start_time, &course.end_time)
        .unwrap_or_else(|| format!("{} - {}", course.start_time, course.end_time));
    let today = Local::now().date_naive();
    let status = if course.accepting_applications(today) {
        "open"
    } else {
        "closed"
    };

    let mut lines = vec![
        format!("{} ({})", course.title, course.id),
        format!("Category: {}", course.category.as_deref().unwrap_or("-")),
        format!("Course Fee: {}", format_fees(course.fees, currency)),
        format!("Start Date: {}", format_date(course.start_date)),
        format!("Timing: {timing}"),
        format!(
            "Last Date to Apply: {} ({status})",
            format_date(course.last_date_to_apply)
        ),
    ];
    if let Some(details) = &course.details {
        lines.push(format!("Details: {details}"));
    }
    if let Some(link) = &course.pdf_link {
        lines.push(format!("Brochure: {link}"));
    }
    lines
}
