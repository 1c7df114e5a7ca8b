//! HTTP client for an OpenAI-compatible chat-completions endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::{Config, Credentials};
use crate::error::{ConfigError, GenerationError};

use super::{ChatCompletion, ChatRequest, CompletionClient};

const COMPLETIONS_PATH: &str = "chat/completions";
const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

/// Error envelope returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

/// Chat-completions client built once at startup from [`Config`].
pub struct OpenAiClient {
    http: Client,
    endpoint: Url,
    credentials: Credentials,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        let endpoint =
            config
                .base_url
                .join(COMPLETIONS_PATH)
                .map_err(|e| ConfigError::InvalidBaseUrl {
                    url: config.base_url.to_string(),
                    reason: e.to_string(),
                })?;

        Ok(Self {
            http,
            endpoint,
            credentials: config.credentials.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn handle_error_response(&self, response: reqwest::Response) -> GenerationError {
        let status = response.status();
        debug!(status = %status, "Received error response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok());
            return GenerationError::RateLimited { retry_after_secs };
        }

        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => match body.error.error_type {
                Some(kind) => format!("{} ({kind})", body.error.message),
                None => body.error.message,
            },
            Err(_) => format!("HTTP {status}"),
        };

        GenerationError::Api {
            status: Some(status.as_u16()),
            message,
        }
    }
}

/// Connection failures and timeouts are provider errors, not bugs.
fn transport_error(e: reqwest::Error) -> GenerationError {
    GenerationError::Api {
        status: e.status().map(|s| s.as_u16()),
        message: e.to_string(),
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn complete(&self, model: &str, prompt: &str) -> Result<ChatCompletion, GenerationError> {
        let request = ChatRequest::user(model, prompt);

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.credentials.api_key)
            .header(ORGANIZATION_HEADER, &self.credentials.org_id)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        let body = response.text().await.map_err(transport_error)?;

        serde_json::from_str(&body).map_err(|e| {
            let truncated: String = body.chars().take(200).collect();
            GenerationError::Unexpected(format!(
                "Failed to parse completion response: {e}. Response: {truncated}"
            ))
        })
    }
}
