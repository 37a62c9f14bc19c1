use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::fortune::fallback::FallbackPool;
use crate::fortune::generator::{LlmSentenceGenerator, SentenceGenerator};
use crate::fortune::orchestrator::GenerationOrchestrator;
use crate::fortune::profile::DeploymentProfile;
use crate::fortune::prompts::build_system_prompt;
use crate::fortune::themes::ThemeSelector;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub profile: Arc<DeploymentProfile>,
    pub themes: ThemeSelector,
    /// `None` when no API key is configured; the generate route answers 400.
    pub orchestrator: Option<Arc<GenerationOrchestrator>>,
}

impl AppState {
    /// Wires the production pipeline from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let profile = DeploymentProfile::for_kind(config.profile).with_max_attempts(config.max_attempts);

        let generator: Option<Arc<dyn SentenceGenerator>> = match &config.anthropic_api_key {
            Some(key) => {
                let llm = LlmClient::new(key.clone(), &config.anthropic_api_url, config.llm_timeout)
                    .context("Failed to build HTTP client")?;
                Some(Arc::new(LlmSentenceGenerator::new(
                    llm,
                    build_system_prompt(profile.persona),
                    profile.max_tokens,
                )))
            }
            None => None,
        };

        Self::with_generator(config, profile, generator)
    }

    /// Builds state around any generator backend.
    pub fn with_generator(
        config: Config,
        profile: DeploymentProfile,
        generator: Option<Arc<dyn SentenceGenerator>>,
    ) -> Result<Self> {
        let themes = ThemeSelector::new(profile.themes)?;
        let orchestrator = match generator {
            Some(generator) => {
                let fallback = FallbackPool::new(profile.fallbacks.iter().copied())?;
                Some(Arc::new(GenerationOrchestrator::new(
                    generator,
                    fallback,
                    profile.max_attempts,
                )))
            }
            None => None,
        };

        Ok(Self {
            config,
            profile: Arc::new(profile),
            themes,
            orchestrator,
        })
    }
}
