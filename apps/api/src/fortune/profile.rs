//! Deployment profiles: everything that differs between the standalone
//! server and the single-function deployment, in one place.

use crate::config::ProfileKind;
use crate::fortune::fallback::{SERVERLESS_FALLBACKS, STANDALONE_FALLBACKS};
use crate::fortune::orchestrator::DEFAULT_MAX_ATTEMPTS;
use crate::fortune::prompts::{SERVERLESS_PERSONA, STANDALONE_PERSONA};
use crate::fortune::themes::{SERVERLESS_THEMES, STANDALONE_THEMES};

#[derive(Debug, Clone)]
pub struct DeploymentProfile {
    pub kind: ProfileKind,
    pub max_attempts: u32,
    pub max_tokens: u32,
    pub themes: &'static [&'static str],
    pub fallbacks: &'static [&'static str],
    pub persona: &'static str,
    /// Honour `?theme=` on the generate route.
    pub allow_theme_override: bool,
    /// Serve `/` and `/index.html` from the static directory.
    pub serve_index: bool,
}

impl DeploymentProfile {
    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Standalone => Self {
                kind,
                max_attempts: DEFAULT_MAX_ATTEMPTS,
                max_tokens: 150,
                themes: STANDALONE_THEMES,
                fallbacks: STANDALONE_FALLBACKS,
                persona: STANDALONE_PERSONA,
                allow_theme_override: true,
                serve_index: true,
            },
            ProfileKind::Serverless => Self {
                kind,
                max_attempts: 1,
                max_tokens: 200,
                themes: SERVERLESS_THEMES,
                fallbacks: SERVERLESS_FALLBACKS,
                persona: SERVERLESS_PERSONA,
                allow_theme_override: false,
                serve_index: false,
            },
        }
    }

    /// Replaces the profile's attempt count when one is configured.
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        if let Some(n) = max_attempts {
            self.max_attempts = n;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_defaults() {
        let p = DeploymentProfile::for_kind(ProfileKind::Standalone);
        assert_eq!(p.max_attempts, 3);
        assert_eq!(p.max_tokens, 150);
        assert_eq!(p.themes.len(), 14);
        assert!(p.allow_theme_override);
        assert!(p.serve_index);
    }

    #[test]
    fn test_serverless_is_one_shot() {
        let p = DeploymentProfile::for_kind(ProfileKind::Serverless);
        assert_eq!(p.max_attempts, 1);
        assert_eq!(p.max_tokens, 200);
        assert_eq!(p.themes.len(), 12);
        assert!(!p.allow_theme_override);
        assert!(!p.serve_index);
    }

    #[test]
    fn test_max_attempts_override() {
        let p = DeploymentProfile::for_kind(ProfileKind::Serverless).with_max_attempts(Some(5));
        assert_eq!(p.max_attempts, 5);
        let p = DeploymentProfile::for_kind(ProfileKind::Standalone).with_max_attempts(None);
        assert_eq!(p.max_attempts, 3);
    }
}
