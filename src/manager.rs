//! REST client for the experiment manager
//!
//! Wraps the two calls the dashboard helpers make: a JSON GET that surfaces
//! manager-reported errors, and trial job cancellation. Requests are sent
//! once; there is no retry.

use crate::config::ManagerConfig;
use crate::error::{AppError, AppResult};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;

/// Content type the manager expects on job cancellation
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Async client for the manager REST API
#[derive(Debug, Clone)]
pub struct ManagerClient {
    base_url: String,
    http: reqwest::Client,
}

impl ManagerClient {
    /// Create a client for the configured manager
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ManagerConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds()))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url().to_string(),
            http,
        })
    }

    /// Get the REST API root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON document
    ///
    /// # Errors
    /// Returns [`AppError::Api`] when the status is not 200 or the body carries
    /// an `error` field, and [`AppError::Http`] on transport failures.
    pub async fn request_json(&self, url: &str) -> AppResult<Value> {
        let response = self.http.get(url).send().await.map_err(|source| AppError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(url = %url, status = %status, "Manager request failed");
            return Err(AppError::Api {
                url: url.to_string(),
                reason: format!("{} error", status.as_u16()),
            });
        }

        let body: Value = response.json().await.map_err(|source| AppError::Http {
            url: url.to_string(),
            source,
        })?;

        if let Some(error) = body.get("error") {
            let reason = match error {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            };
            tracing::warn!(url = %url, reason = %reason, "Manager reported an error");
            return Err(AppError::Api {
                url: url.to_string(),
                reason,
            });
        }

        Ok(body)
    }

    /// Cancel a trial job
    ///
    /// # Errors
    /// A 500 response yields the manager's `error` message when it sends one,
    /// otherwise `500 error, fail to cancel the job`. Any other non-200 status
    /// yields `fail to cancel the job`.
    pub async fn kill_job(&self, trial_job_id: &str) -> AppResult<()> {
        let url = format!("{}/trial-jobs/{}", self.base_url, trial_job_id);

        let response = self
            .http
            .delete(&url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .send()
            .await
            .map_err(|source| AppError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                tracing::info!(trial_job_id, "Cancelled trial job");
                Ok(())
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                // Body may be empty or not JSON; fall back to the generic message
                let message = response
                    .json::<Value>()
                    .await
                    .ok()
                    .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| "500 error, fail to cancel the job".to_string());
                tracing::warn!(trial_job_id, reason = %message, "Trial job cancellation failed");
                Err(AppError::Api {
                    url,
                    reason: message,
                })
            }
            other => {
                tracing::warn!(trial_job_id, status = %other, "Trial job cancellation failed");
                Err(AppError::Api {
                    url,
                    reason: "fail to cancel the job".to_string(),
                })
            }
        }
    }
}
