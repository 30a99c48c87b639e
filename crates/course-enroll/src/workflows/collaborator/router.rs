use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{info, warn};

use super::repository::{ApplicationRepository, RepositoryError};
use crate::workflows::catalog::CourseCatalog;
use crate::workflows::enrollment::gateway::SubmissionReceipt;
use crate::workflows::enrollment::identifier::{MAX_APPLICATION_ID, MIN_APPLICATION_ID};
use crate::workflows::enrollment::Application;

pub struct CollaboratorState<R> {
    pub catalog: Arc<CourseCatalog>,
    pub applications: Arc<R>,
}

impl<R> Clone for CollaboratorState<R> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            applications: Arc::clone(&self.applications),
        }
    }
}

/// Router serving the course API consumed by the enrollment client.
pub fn collaborator_router<R>(catalog: Arc<CourseCatalog>, applications: Arc<R>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/courses", get(list_courses_handler::<R>))
        .route("/courses/:course_id", get(course_handler::<R>))
        .route("/categories", get(list_categories_handler::<R>))
        .route("/applications", post(submit_handler::<R>))
        .with_state(CollaboratorState {
            catalog,
            applications,
        })
}

pub(crate) async fn list_courses_handler<R>(State(state): State<CollaboratorState<R>>) -> Response
where
    R: ApplicationRepository + 'static,
{
    (StatusCode::OK, Json(state.catalog.courses.clone())).into_response()
}

pub(crate) async fn list_categories_handler<R>(
    State(state): State<CollaboratorState<R>>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    (StatusCode::OK, Json(state.catalog.categories.clone())).into_response()
}

pub(crate) async fn course_handler<R>(
    State(state): State<CollaboratorState<R>>,
    Path(course_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match state.catalog.course(&course_id) {
        Some(course) => (StatusCode::OK, Json(course.clone())).into_response(),
        None => {
            let payload = json!({ "error": format!("course {course_id} not found") });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submit_handler<R>(
    State(state): State<CollaboratorState<R>>,
    Json(application): Json<Application>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    if !is_application_id(application.application_id().as_str()) {
        return rejection(
            StatusCode::UNPROCESSABLE_ENTITY,
            "application id must be a 6 digit number",
        );
    }
    if state.catalog.course(application.course_id()).is_none() {
        return rejection(StatusCode::UNPROCESSABLE_ENTITY, "unknown course");
    }

    let application_id = application.application_id().clone();
    match state.applications.insert(application) {
        Ok(stored) => {
            info!(
                application_id = %application_id,
                course_id = %stored.course_id(),
                "application received"
            );
            (StatusCode::CREATED, Json(SubmissionReceipt::accepted())).into_response()
        }
        Err(RepositoryError::Conflict) => {
            warn!(application_id = %application_id, "duplicate application id rejected");
            rejection(StatusCode::CONFLICT, "application id already exists")
        }
        Err(other) => rejection(StatusCode::SERVICE_UNAVAILABLE, &other.to_string()),
    }
}

fn rejection(status: StatusCode, message: &str) -> Response {
    (status, Json(SubmissionReceipt::rejected(message))).into_response()
}

fn is_application_id(raw: &str) -> bool {
    raw.parse::<u32>()
        .map(|value| (MIN_APPLICATION_ID..=MAX_APPLICATION_ID).contains(&value))
        .unwrap_or(false)
        && raw.len() == 6
}
