// SPDX-License-Identifier: Apache-2.0

//! Static registry of the chat-completion providers gitgrab can talk to.
//!
//! Every provider exposes an OpenAI-compatible `/chat/completions` endpoint
//! and reads its API key from a dedicated environment variable.
//!
//! # Examples
//!
//! ```
//! use gitgrab_core::ai::registry::{all_providers, get_provider};
//!
//! let groq = get_provider("groq").unwrap();
//! assert_eq!(groq.api_key_env, "GROQ_API_KEY");
//! assert_eq!(all_providers().len(), 4);
//! ```

/// Metadata for a single AI model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelInfo {
    /// Human-readable model name for UI display
    pub display_name: &'static str,

    /// Provider-specific model identifier used in API requests
    pub identifier: &'static str,

    /// Maximum context window size in tokens
    pub context_window: u32,
}

/// Configuration for an AI provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Provider identifier (lowercase, used in config files)
    pub name: &'static str,

    /// Human-readable provider name for UI display
    pub display_name: &'static str,

    /// Chat completions endpoint
    pub api_url: &'static str,

    /// Environment variable name for API key
    pub api_key_env: &'static str,

    /// Known-good models for this provider
    pub models: &'static [ModelInfo],
}

const GROQ_MODELS: &[ModelInfo] = &[
    ModelInfo {
        display_name: "Qwen3 32B",
        identifier: "qwen/qwen3-32b",
        context_window: 131_072,
    },
    ModelInfo {
        display_name: "GPT-OSS 20B",
        identifier: "openai/gpt-oss-20b",
        context_window: 131_072,
    },
    ModelInfo {
        display_name: "GPT-OSS 120B",
        identifier: "openai/gpt-oss-120b",
        context_window: 131_072,
    },
];

const OPENROUTER_MODELS: &[ModelInfo] = &[ModelInfo {
    display_name: "Devstral 2",
    identifier: "mistralai/devstral-2512:free",
    context_window: 262_144,
}];

const GEMINI_MODELS: &[ModelInfo] = &[ModelInfo {
    display_name: "Gemini 3 Flash",
    identifier: "gemini-3-flash-preview",
    context_window: 1_048_576,
}];

const CEREBRAS_MODELS: &[ModelInfo] = &[ModelInfo {
    display_name: "Llama 3.3 70B",
    identifier: "llama-3.3-70b",
    context_window: 128_000,
}];

/// All supported providers. The first entry is the default.
pub static PROVIDERS: &[ProviderConfig] = &[
    ProviderConfig {
        name: "groq",
        display_name: "Groq",
        api_url: "https://api.groq.com/openai/v1/chat/completions",
        api_key_env: "GROQ_API_KEY",
        models: GROQ_MODELS,
    },
    ProviderConfig {
        name: "openrouter",
        display_name: "OpenRouter",
        api_url: "https://openrouter.ai/api/v1/chat/completions",
        api_key_env: "OPENROUTER_API_KEY",
        models: OPENROUTER_MODELS,
    },
    ProviderConfig {
        name: "gemini",
        display_name: "Google Gemini",
        api_url: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
        api_key_env: "GEMINI_API_KEY",
        models: GEMINI_MODELS,
    },
    ProviderConfig {
        name: "cerebras",
        display_name: "Cerebras",
        api_url: "https://api.cerebras.ai/v1/chat/completions",
        api_key_env: "CEREBRAS_API_KEY",
        models: CEREBRAS_MODELS,
    },
];

/// Retrieves a provider configuration by name (case-sensitive, lowercase).
#[must_use]
pub fn get_provider(name: &str) -> Option<&'static ProviderConfig> {
    PROVIDERS.iter().find(|p| p.name == name)
}

/// Returns all available providers.
#[must_use]
pub fn all_providers() -> &'static [ProviderConfig] {
    PROVIDERS
}
