// ABOUTME: Feedback relay client posting user feedback as JSON over HTTP
// ABOUTME: Awaitable submit plus a detached fire-and-forget variant that logs failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::FeedbackConfig;
use crate::errors::{AppError, AppResult};
use crate::validation::validate_feedback_message;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const SERVICE: &str = "Feedback relay";

/// Body posted to the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackMessage {
    /// Reply-to address, empty when unknown
    pub email: String,
    /// Feedback text
    pub message: String,
}

/// HTTP client for the feedback relay
#[derive(Debug, Clone)]
pub struct FeedbackClient {
    endpoint: String,
    http_client: reqwest::Client,
}

impl FeedbackClient {
    /// Build a client for the configured relay
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be constructed
    pub fn new(config: &FeedbackConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            http_client,
        })
    }

    /// Relay endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post feedback and wait for the relay to accept it
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a blank message before any request
    /// is made, and `ExternalServiceError` for transport failures or a non-2xx
    /// response
    pub async fn submit(&self, email: Option<&str>, message: &str) -> AppResult<()> {
        validate_feedback_message(message)?;

        let body = FeedbackMessage {
            email: email.unwrap_or_default().to_owned(),
            message: message.trim().to_owned(),
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                SERVICE,
                format!("relay returned {status}: {detail}"),
            ));
        }

        info!(endpoint = %self.endpoint, "Feedback submitted");
        Ok(())
    }

    /// Submit on a background task; failures are logged, never returned
    ///
    /// Validation still runs synchronously so a blank message is rejected
    /// without spawning anything.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a blank message
    pub fn submit_detached(
        &self,
        email: Option<String>,
        message: String,
    ) -> AppResult<JoinHandle<()>> {
        validate_feedback_message(&message)?;
        let client = self.clone();
        Ok(tokio::spawn(async move {
            if let Err(e) = client.submit(email.as_deref(), &message).await {
                warn!(error = %e, "Detached feedback submission failed");
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[tokio::test]
    async fn test_blank_message_is_rejected_before_request() {
        let client = FeedbackClient::new(&FeedbackConfig {
            endpoint: "http://127.0.0.1:9/unused".to_owned(),
            ..FeedbackConfig::default()
        })
        .unwrap();

        let err = client.submit(Some("a@b.c"), "   ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert!(client.submit_detached(None, String::new()).is_err());
    }

    #[test]
    fn test_message_body_shape() {
        let body = serde_json::to_value(FeedbackMessage {
            email: "a@b.c".to_owned(),
            message: "hi".to_owned(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "email": "a@b.c", "message": "hi" }));
    }
}
