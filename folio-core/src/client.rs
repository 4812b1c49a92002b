//! HTTP client for the portfolio backend.
//!
//! Two endpoints make up the contract: `POST /api/chat` and
//! `GET /api/resume`. Neither public entry point returns an error: chat
//! failures come back as a [`ChatResponse`] with `error` set, resume
//! failures as `None`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{FolioError, FolioResult};
use crate::models::{ChatMessage, ChatRequest, ChatResponse, HealthStatus, ResumeData};

/// Shown when the server answered with a failure but gave no usable message.
pub const GENERIC_FAILURE_FALLBACK: &str = "Something went wrong. Please try again.";

/// Shown when no usable response was received at all.
pub const CONNECTIVITY_FALLBACK: &str = "Unable to connect to the server. Please try again later.";

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// Carries one chat exchange to the assistant.
///
/// Implementations must not fail: every failure mode is folded into the
/// returned [`ChatResponse`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_chat(&self, message: &str, history: &[ChatMessage]) -> ChatResponse;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_user_agent(base_url, USER_AGENT)
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        match config.user_agent.as_deref() {
            Some(agent) => Self::with_user_agent(&config.base_url, agent),
            None => Self::new(&config.base_url),
        }
    }

    fn with_user_agent(base_url: impl Into<String>, user_agent: &str) -> Self {
        // No request timeout: the transport default applies.
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends one chat exchange and reports the precise failure, if any.
    pub async fn post_chat(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> FolioResult<ChatResponse> {
        let url = self.endpoint("/api/chat");
        debug!(%url, history_len = history.len(), "Sending chat message");

        let resp = self
            .client
            .post(&url)
            .json(&ChatRequest { message, history })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .filter(|error| !error.is_empty());
            warn!(status = status.as_u16(), "Chat endpoint returned failure status");
            return Err(FolioError::ServerReported {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<ChatResponse>()
            .await
            .map_err(|e| FolioError::ApiParseError(e.to_string()))
    }

    pub async fn try_fetch_resume(&self) -> FolioResult<ResumeData> {
        let url = self.endpoint("/api/resume");
        debug!(%url, "Fetching resume");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FolioError::ResumeUnavailable(format!(
                "{} returned status {}",
                url, status
            )));
        }

        resp.json::<ResumeData>()
            .await
            .map_err(|e| FolioError::ResumeParseError {
                origin: url,
                message: e.to_string(),
            })
    }

    /// Fetches the server-hosted resume mirror; `None` on any failure.
    pub async fn fetch_resume(&self) -> Option<ResumeData> {
        match self.try_fetch_resume().await {
            Ok(resume) => Some(resume),
            Err(e) => {
                warn!(error_code = e.error_code(), "Resume fetch failed: {}", e);
                None
            }
        }
    }

    pub async fn health(&self) -> FolioResult<HealthStatus> {
        let url = self.endpoint("/api/health");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FolioError::ServerReported {
                status: status.as_u16(),
                message: None,
            });
        }

        resp.json::<HealthStatus>()
            .await
            .map_err(|e| FolioError::ApiParseError(e.to_string()))
    }
}

#[async_trait]
impl ChatTransport for ApiClient {
    async fn send_chat(&self, message: &str, history: &[ChatMessage]) -> ChatResponse {
        match self.post_chat(message, history).await {
            Ok(response) => response,
            Err(e) => {
                e.log();
                ChatResponse::failure(e.chat_message())
            }
        }
    }
}
