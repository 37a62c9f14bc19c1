//! Generation orchestrator: bounded generate → moderate loop with fallback.
//!
//! Flow per attempt: generate → moderation::passes → accept, or log and retry.
//! Attempts are sequential with no delay. After the last attempt a sentence
//! from the fallback pool is returned. Nothing here ever fails the request.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::fortune::fallback::FallbackPool;
use crate::fortune::generator::SentenceGenerator;
use crate::fortune::moderation;
use crate::fortune::themes::Theme;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Where the returned sentence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Ai,
    Fallback,
}

/// The only externally visible output of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseEnvelope {
    pub sentence: String,
    pub theme: Theme,
    pub source: Source,
}

pub struct GenerationOrchestrator {
    generator: Arc<dyn SentenceGenerator>,
    fallback: FallbackPool,
    max_attempts: u32,
}

impl GenerationOrchestrator {
    pub fn new(generator: Arc<dyn SentenceGenerator>, fallback: FallbackPool, max_attempts: u32) -> Self {
        Self {
            generator,
            fallback,
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn fallback(&self) -> &FallbackPool {
        &self.fallback
    }

    /// Runs up to `max_attempts` attempts for `theme`, then falls back.
    pub async fn produce(&self, theme: Theme) -> ResponseEnvelope {
        info!(theme = %theme, max_attempts = self.max_attempts, "Generating fortune");

        for attempt in 1..=self.max_attempts {
            match self.generator.generate(&theme).await {
                Ok(candidate) if moderation::passes(&candidate) => {
                    info!(attempt, candidate = %candidate, "Candidate accepted");
                    return ResponseEnvelope {
                        sentence: candidate,
                        theme,
                        source: Source::Ai,
                    };
                }
                Ok(candidate) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        candidate = %candidate,
                        "Candidate rejected by moderation"
                    );
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Generation attempt failed"
                    );
                }
            }
        }

        let sentence = self.fallback.pick().to_string();
        warn!(sentence = %sentence, "All attempts exhausted, serving fallback");
        ResponseEnvelope {
            sentence,
            theme,
            source: Source::Fallback,
        }
    }
}
