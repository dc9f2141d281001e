use axum::{Router, extract::DefaultBodyLimit, routing::post};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{any_path_handler, kv_handler, usage_handler};
use crate::state::AppState;

// Route path constants - single source of truth for all API paths

pub const KV: &str = "/";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI: &str = "/swagger-ui";

/// Build the application router.
///
/// Every path other than the documentation routes behaves like `/`, and
/// non-POST methods get the usage hint instead of a 405. Request bodies are
/// not size-capped so any value can be stored.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(KV, post(kv_handler).fallback(usage_handler))
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .fallback(any_path_handler)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
