//! Axum route handlers for the fortune API and the static index page.

use std::io::ErrorKind;

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::Local;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

const INDEX_FILE: &str = "index.html";

/// First value of `key` in decoded query pairs. Repeats are ignored.
fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// GET /api/generate[?theme=...]
///
/// Always 200 with `{sentence, theme, source}` once a key is configured;
/// generation failures surface as `source: "fallback"`, never as an error.
/// The query is read as raw pairs so a repeated `theme` cannot fail extraction.
pub async fn handle_generate(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let orchestrator = state
        .orchestrator
        .as_ref()
        .ok_or(AppError::MissingApiKey)?;

    let override_theme = first_param(&params, "theme")
        .filter(|t| state.profile.allow_theme_override && !t.is_empty());

    let theme = state.themes.resolve(&Local::now(), override_theme);
    let envelope = orchestrator.produce(theme).await;

    Ok((
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        Json(envelope),
    ))
}

/// GET / and GET /index.html
///
/// Re-reads the file on every request so edits show up without a restart.
/// A missing file is a 404 with guidance; any other read failure is a 500.
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = state.config.static_dir.join(INDEX_FILE);
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Ok(Html(body)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Could not read {}: {e}", path.display());
            Err(AppError::NotFound(format!(
                "{INDEX_FILE} not found. Place it in the static directory ({}).",
                state.config.static_dir.display()
            )))
        }
        Err(e) => Err(AppError::Internal(
            anyhow::Error::new(e).context(format!("Failed to read {}", path.display())),
        )),
    }
}
