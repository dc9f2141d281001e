use utoipa::OpenApi;

use crate::handlers;
use crate::models::{KvRequest, KvResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rust-postgres-kv API",
        version = "1.0.0",
        description = "A string key-value store backed by PostgreSQL. \
            Failures are reported as a plain-text line with status 200."
    ),
    paths(handlers::kv::kv_handler),
    components(schemas(KvRequest, KvResponse)),
    tags(
        (name = "kv", description = "Key-value store operations")
    )
)]
pub struct ApiDoc;
