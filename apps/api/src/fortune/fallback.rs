//! Fallback pool: hand-vetted sentences served when generation gives up.
//!
//! Entries are exempt from moderation: they are reviewed when added here.

use anyhow::{bail, Result};
use rand::Rng;

pub const STANDALONE_FALLBACKS: &[&str] = &[
    "Go look at your bank balance. That is why you came in today.",
    "You were thinking about going home before you even left the house. How many years has that been?",
    "You said you only had to survive today. You said that yesterday too.",
    "You know a message will land five minutes before you leave. Why are you still hoping?",
];

pub const SERVERLESS_FALLBACKS: &[&str] = &[
    "The alarm went off and the first thing you did was sigh. Still, you got up. Even your lack of willpower behaves when rent is due.",
    "The company only looks a little bit nice on payday. Humans are simple. You included.",
    "You held on all day just to go home. Those hours are your career. Not flashy, but they keep stacking up.",
    "Just until this project wraps up... how many times have you said that? Still, the one hanging on to the end is you.",
];

/// A fixed, non-empty set of pre-written sentences.
#[derive(Debug, Clone)]
pub struct FallbackPool {
    sentences: Vec<String>,
}

impl FallbackPool {
    pub fn new<I, S>(sentences: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sentences: Vec<String> = sentences.into_iter().map(Into::into).collect();
        if sentences.is_empty() {
            bail!("fallback pool must contain at least one sentence");
        }
        Ok(Self { sentences })
    }

    /// Picks one entry uniformly at random.
    pub fn pick(&self) -> &str {
        let index = rand::thread_rng().gen_range(0..self.sentences.len());
        &self.sentences[index]
    }

    #[cfg(test)]
    pub fn contains(&self, sentence: &str) -> bool {
        self.sentences.iter().any(|s| s == sentence)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }
}
