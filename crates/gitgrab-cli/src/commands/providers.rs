// SPDX-License-Identifier: Apache-2.0

//! Provider registry listing.

use gitgrab_core::{AppConfig, all_providers};

use super::types::{ProviderSummary, ProvidersResult};

/// Lists registered providers, marking the configured one.
pub fn run(config: &AppConfig) -> ProvidersResult {
    let providers = all_providers()
        .iter()
        .map(|p| ProviderSummary {
            name: p.name.to_string(),
            display_name: p.display_name.to_string(),
            api_key_env: p.api_key_env.to_string(),
            models: p.models.iter().map(|m| m.identifier.to_string()).collect(),
            active: p.name == config.ai.provider,
        })
        .collect();
    ProvidersResult { providers }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_provider_is_active() {
        let result = run(&AppConfig::default());
        let active: Vec<_> = result.providers.iter().filter(|p| p.active).collect();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "groq");
        assert_eq!(active[0].models[0], "qwen/qwen3-32b");
    }
}
