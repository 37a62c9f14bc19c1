// Fortune generation pipeline.
// Implements: theme selection, moderation, LLM generation, bounded retry with fallback.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod moderation;
pub mod orchestrator;
pub mod profile;
pub mod prompts;
pub mod themes;
