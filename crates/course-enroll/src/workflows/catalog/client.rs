use serde::de::DeserializeOwned;

use super::domain::{Category, Course};
use super::CatalogError;

/// HTTP client for the read side of the course API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Share a connection pool with other clients (e.g. the application gateway).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base_url}/courses/{id}` with the id encoded as a single path segment.
    fn course_url(&self, id: &str) -> Result<reqwest::Url, CatalogError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|err| CatalogError::InvalidUrl(format!("{}: {err}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("courses")
            .push(id);
        Ok(url)
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, CatalogError> {
        let response = self.client.get(self.url("/courses")).send().await?;
        self.handle_response(response, "courses").await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let response = self.client.get(self.url("/categories")).send().await?;
        self.handle_response(response, "categories").await
    }

    pub async fn get_course(&self, id: &str) -> Result<Course, CatalogError> {
        let response = self.client.get(self.course_url(id)?).send().await?;
        self.handle_response(response, &format!("course {id}")).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T, CatalogError> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(CatalogError::from)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(CatalogError::NotFound {
                resource: resource.to_string(),
            })
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            Err(CatalogError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }
}
