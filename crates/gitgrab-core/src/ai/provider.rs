// SPDX-License-Identifier: Apache-2.0

//! AI provider trait and shared request handling.
//!
//! Defines the `AiProvider` trait, with default implementations for sending
//! a chat completion, classifying HTTP failures, retrying transient errors
//! and feeding the circuit breaker.

use anyhow::{Context, Result};
use async_trait::async_trait;
use backon::Retryable;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use super::CircuitBreaker;
use super::types::{AiStats, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::error::GrabError;
use crate::retry::{extract_retry_after, is_retryable_anyhow, retry_backoff};

/// Chat completion provider.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Returns the name of the provider (e.g., "groq").
    fn name(&self) -> &str;

    /// Returns the chat completions URL.
    fn api_url(&self) -> &str;

    /// Returns the environment variable name for the API key.
    fn api_key_env(&self) -> &str;

    /// Returns the HTTP client for making requests.
    fn http_client(&self) -> &Client;

    /// Returns the API key for authentication.
    fn api_key(&self) -> &SecretString;

    /// Returns the model name.
    fn model(&self) -> &str;

    /// Returns the maximum tokens for API responses.
    fn max_tokens(&self) -> u32;

    /// Returns the temperature for API requests.
    fn temperature(&self) -> f32;

    /// Returns the circuit breaker for this provider, if any.
    fn circuit_breaker(&self) -> Option<&CircuitBreaker> {
        None
    }

    /// Builds extra HTTP headers for API requests.
    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(val) = "application/json".parse() {
            headers.insert("Content-Type", val);
        }
        headers
    }

    /// Sends one chat completion request (no retry).
    ///
    /// Maps 401 to an invalid-key error, 429 to [`GrabError::RateLimited`]
    /// (honoring `Retry-After`) and other failures to [`GrabError::AI`]
    /// with the status attached.
    async fn send_request_inner(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let mut req = self.http_client().post(self.api_url()).header(
            "Authorization",
            format!("Bearer {}", self.api_key().expose_secret()),
        );

        for (key, value) in &self.build_headers() {
            req = req.header(key.clone(), value.clone());
        }

        let response = req
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {} API", self.name()))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                warn!("Rate limited by {} API", self.name());
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(0);
                debug!(retry_after, "Parsed Retry-After header");
                return Err(GrabError::RateLimited {
                    provider: self.name().to_string(),
                    retry_after,
                }
                .into());
            }

            let message = if status.as_u16() == 401 {
                format!(
                    "Invalid {} API key. Check your {} environment variable.",
                    self.name(),
                    self.api_key_env()
                )
            } else {
                response.text().await.unwrap_or_default()
            };
            return Err(GrabError::AI {
                message,
                status: Some(status.as_u16()),
                provider: self.name().to_string(),
            }
            .into());
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} API response", self.name()))?;

        Ok(completion)
    }

    /// Sends a conversation and returns the assistant's text with usage stats.
    ///
    /// Retries transient failures with exponential backoff and records the
    /// outcome in the circuit breaker.
    #[instrument(skip(self, messages), fields(provider = %self.name(), model = %self.model()))]
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<(String, AiStats)> {
        if let Some(cb) = self.circuit_breaker()
            && cb.is_open()
        {
            return Err(GrabError::CircuitOpen.into());
        }

        let request = ChatCompletionRequest {
            model: self.model().to_string(),
            messages,
            max_tokens: Some(self.max_tokens()),
            temperature: Some(self.temperature()),
        };

        let start = std::time::Instant::now();

        let result = (|| async {
            let completion = self.send_request_inner(&request).await?;
            let content = completion
                .choices
                .first()
                .map(|c| c.message.content.clone())
                .filter(|c| !c.trim().is_empty())
                .context("No response from AI model")?;
            Ok((content, completion.usage.unwrap_or_default()))
        })
        .retry(retry_backoff())
        .when(is_retryable_anyhow)
        .adjust(|err, dur| dur.map(|d| extract_retry_after(err).unwrap_or(d)))
        .notify(|err, dur| warn!(error = %err, delay = ?dur, "Retrying after error"))
        .await;

        let (content, usage) = match result {
            Ok(ok) => {
                if let Some(cb) = self.circuit_breaker() {
                    cb.record_success();
                }
                ok
            }
            Err(e) => {
                if let Some(cb) = self.circuit_breaker() {
                    cb.record_failure();
                }
                return Err(e);
            }
        };

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;

        let stats = AiStats {
            model: self.model().to_string(),
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            duration_ms,
        };

        debug!(
            input_tokens = stats.input_tokens,
            output_tokens = stats.output_tokens,
            duration_ms = stats.duration_ms,
            response_length = content.len(),
            "AI completion finished"
        );

        Ok((content, stats))
    }
}
