use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::Application;

/// Body of a `POST /applications` response. Anything without a boolean `success`
/// is treated as a failed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmissionReceipt {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Why the collaborator did not accept an application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteFailure {
    #[error("application rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },
    #[error("collaborator returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("collaborator unreachable: {0}")]
    Transport(String),
    #[error("unexpected response from collaborator: {0}")]
    InvalidResponse(String),
}

/// Write side of the remote collaborator.
#[async_trait]
pub trait ApplicationGateway: Send + Sync {
    /// Submit once. `Ok` only when the collaborator reports `success: true`.
    async fn submit(&self, application: &Application) -> Result<SubmissionReceipt, RemoteFailure>;
}

/// `POST {base_url}/applications` over reqwest. No request timeout is configured.
#[derive(Debug, Clone)]
pub struct HttpApplicationGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApplicationGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self) -> String {
        format!("{}/applications", self.base_url)
    }
}

#[async_trait]
impl ApplicationGateway for HttpApplicationGateway {
    async fn submit(&self, application: &Application) -> Result<SubmissionReceipt, RemoteFailure> {
        let response = self
            .client
            .post(self.url())
            .json(application)
            .send()
            .await
            .map_err(|err| RemoteFailure::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| RemoteFailure::Transport(err.to_string()))?;

        interpret_response(status.as_u16(), status.is_success(), &body)
    }
}

pub(crate) fn interpret_response(
    status: u16,
    is_success: bool,
    body: &str,
) -> Result<SubmissionReceipt, RemoteFailure> {
    let receipt = serde_json::from_str::<SubmissionReceipt>(body);

    if !is_success {
        let message = match receipt {
            Ok(SubmissionReceipt {
                message: Some(message),
                ..
            }) => message,
            _ => body.trim().to_string(),
        };
        return Err(RemoteFailure::Status { status, message });
    }

    match receipt {
        Ok(receipt) if receipt.success => Ok(receipt),
        Ok(receipt) => Err(RemoteFailure::Rejected {
            message: receipt.message,
        }),
        Err(err) => Err(RemoteFailure::InvalidResponse(err.to_string())),
    }
}
