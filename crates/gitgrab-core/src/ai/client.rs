// SPDX-License-Identifier: Apache-2.0

//! Generic AI client for all registered providers.
//!
//! A single `AiClient` works with any provider in the [`registry`](super::registry).
//! The API key is resolved once at construction; a missing key is a typed
//! [`GrabError::MissingApiKey`] rather than a crash.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::SecretString;

use super::circuit_breaker::CircuitBreaker;
use super::provider::AiProvider;
use super::registry::{ProviderConfig, get_provider};
use crate::config::AiConfig;
use crate::error::GrabError;

/// Generic AI client for all providers.
///
/// Holds the HTTP client, API key and model configuration for reuse across
/// requests.
#[derive(Debug)]
pub struct AiClient {
    /// Provider configuration from registry.
    provider: &'static ProviderConfig,
    /// Chat completions URL (registry default or configured override).
    api_url: String,
    /// HTTP client with configured timeout.
    http: Client,
    /// API key for provider authentication.
    api_key: SecretString,
    /// Model name (e.g., "qwen/qwen3-32b").
    model: String,
    /// Maximum tokens for API responses.
    max_tokens: u32,
    /// Temperature for API requests.
    temperature: f32,
    /// Failure breaker shared by every `complete` call on this client.
    circuit_breaker: CircuitBreaker,
}

impl AiClient {
    /// Creates a client, reading the API key from the provider's environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Provider is not found in registry
    /// - API key environment variable is not set or empty
    /// - HTTP client creation fails
    pub fn new(config: &AiConfig) -> Result<Self, GrabError> {
        let provider = lookup(&config.provider)?;

        let api_key = env::var(provider.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GrabError::MissingApiKey {
                provider: provider.name.to_string(),
                env: provider.api_key_env.to_string(),
            })?;

        Self::build(provider, SecretString::from(api_key), config)
    }

    /// Creates a client with a caller-supplied API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unknown or HTTP client creation fails.
    pub fn with_api_key(api_key: SecretString, config: &AiConfig) -> Result<Self, GrabError> {
        let provider = lookup(&config.provider)?;
        Self::build(provider, api_key, config)
    }

    fn build(
        provider: &'static ProviderConfig,
        api_key: SecretString,
        config: &AiConfig,
    ) -> Result<Self, GrabError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            provider,
            api_url: config
                .api_url
                .clone()
                .unwrap_or_else(|| provider.api_url.to_string()),
            http,
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            circuit_breaker: CircuitBreaker::new(
                config.circuit_breaker_threshold,
                config.circuit_breaker_reset_seconds,
            ),
        })
    }

    /// Registry entry of this client's provider.
    #[must_use]
    pub fn provider(&self) -> &'static ProviderConfig {
        self.provider
    }
}

fn lookup(name: &str) -> Result<&'static ProviderConfig, GrabError> {
    get_provider(name).ok_or_else(|| GrabError::Config {
        message: format!("Unknown AI provider: {name}"),
    })
}

#[async_trait]
impl AiProvider for AiClient {
    fn name(&self) -> &str {
        self.provider.name
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn api_key_env(&self) -> &str {
        self.provider.api_key_env
    }

    fn http_client(&self) -> &Client {
        &self.http
    }

    fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn circuit_breaker(&self) -> Option<&CircuitBreaker> {
        Some(&self.circuit_breaker)
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(val) = "application/json".parse() {
            headers.insert("Content-Type", val);
        }

        // OpenRouter attribution headers
        if self.provider.name == "openrouter" {
            if let Ok(val) = "https://github.com/gitgrab/gitgrab".parse() {
                headers.insert("HTTP-Referer", val);
            }
            if let Ok(val) = "gitgrab".parse() {
                headers.insert("X-Title", val);
            }
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::super::registry::all_providers;
    use super::super::types::ChatMessage;
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_url: Option<String>) -> AiConfig {
        AiConfig {
            api_url,
            timeout_seconds: 5,
            ..AiConfig::default()
        }
    }

    #[test]
    fn test_with_api_key_all_providers() {
        for provider_config in all_providers() {
            let config = AiConfig {
                provider: provider_config.name.to_string(),
                ..AiConfig::default()
            };
            let result = AiClient::with_api_key(SecretString::from("test_key"), &config);
            assert!(result.is_ok(), "Failed for provider: {}", provider_config.name);
        }
    }

    #[test]
    fn test_unknown_provider_error() {
        let config = AiConfig {
            provider: "nonexistent".to_string(),
            ..AiConfig::default()
        };
        let result = AiClient::with_api_key(SecretString::from("key"), &config);
        assert!(matches!(result, Err(GrabError::Config { .. })));
    }

    #[test]
    fn test_api_url_override() {
        let client = AiClient::with_api_key(
            SecretString::from("key"),
            &test_config(Some("http://localhost:9999/v1/chat/completions".to_string())),
        )
        .unwrap();
        assert_eq!(client.api_url(), "http://localhost:9999/v1/chat/completions");

        let client =
            AiClient::with_api_key(SecretString::from("key"), &test_config(None)).unwrap();
        assert_eq!(
            client.api_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_complete_returns_content_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "hello"}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AiClient::with_api_key(
            SecretString::from("test_key"),
            &test_config(Some(format!("{}/v1/chat/completions", server.uri()))),
        )
        .unwrap();

        let (content, stats) = client
            .complete(vec![ChatMessage::user("hi")])
            .await
            .unwrap();
        assert_eq!(content, "hello");
        assert_eq!(stats.input_tokens, 12);
        assert_eq!(stats.output_tokens, 3);
        assert_eq!(stats.model, "qwen/qwen3-32b");
    }

    #[tokio::test]
    async fn test_complete_bad_request_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad model"))
            .expect(1)
            .mount(&server)
            .await;

        let client = AiClient::with_api_key(
            SecretString::from("test_key"),
            &test_config(Some(format!("{}/v1/chat/completions", server.uri()))),
        )
        .unwrap();

        let err = client
            .complete(vec![ChatMessage::user("hi")])
            .await
            .unwrap_err();
        let grab = err.downcast_ref::<GrabError>().expect("typed error");
        assert!(matches!(
            grab,
            GrabError::AI {
                status: Some(400),
                ..
            }
        ));
        assert_eq!(client.circuit_breaker().map(|cb| cb.failure_count()), Some(1));
    }

    #[tokio::test]
    async fn test_reused_client_opens_circuit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad model"))
            .expect(2)
            .mount(&server)
            .await;

        let config = AiConfig {
            circuit_breaker_threshold: 2,
            ..test_config(Some(format!("{}/v1/chat/completions", server.uri())))
        };
        let client = AiClient::with_api_key(SecretString::from("test_key"), &config).unwrap();

        for _ in 0..2 {
            assert!(client.complete(vec![ChatMessage::user("hi")]).await.is_err());
        }
        let err = client
            .complete(vec![ChatMessage::user("hi")])
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GrabError>(),
            Some(GrabError::CircuitOpen)
        ));
    }
}
