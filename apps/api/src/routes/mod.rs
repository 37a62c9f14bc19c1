use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

use crate::errors::AppError;
use crate::fortune::handlers;
use crate::state::AppState;

const ALLOWED_METHODS: &str = "GET, OPTIONS";

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}

/// Answers `OPTIONS` on any path with 204 and stamps the CORS headers on
/// every response, including errors and the 404 fallback.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    response
}

/// Routes answer any method: only `OPTIONS` is special-cased (by `cors`).
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new().route("/api/generate", any(handlers::handle_generate));

    if state.profile.serve_index {
        router = router
            .route("/", any(handlers::handle_index))
            .route("/index.html", any(handlers::handle_index));
    }

    router
        .fallback(not_found)
        .layer(middleware::from_fn(cors))
        .with_state(state)
}
