// SPDX-License-Identifier: Apache-2.0

//! AI integration module.
//!
//! Chat-completion access for the report writer: a provider registry, a
//! generic client with retry and circuit breaking, and the report prompt.

pub mod circuit_breaker;
pub mod client;
pub mod prompt;
pub mod provider;
pub mod registry;
pub mod types;

pub use circuit_breaker::CircuitBreaker;
pub use client::AiClient;
pub use provider::AiProvider;
pub use registry::{ModelInfo, ProviderConfig, all_providers, get_provider};
pub use types::{AiStats, ChatMessage};
