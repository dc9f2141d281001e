use crate::error::ApiError;
use crate::handlers::usage_handler;
use crate::models::{KvRequest, KvResponse};
use crate::routes;
use crate::state::AppState;
use crate::store::KvStore;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::Method,
    response::{IntoResponse, Response},
};

/// POST / handler - Get or set a value
///
/// The body is read raw rather than through the `Json` extractor so that
/// decode failures follow the plain-text error contract instead of axum's
/// 4xx rejections.
#[utoipa::path(
    post,
    path = routes::KV,
    request_body = KvRequest,
    responses(
        (status = 200, description = "JSON result on success, one plain-text error line otherwise",
            content(
                (KvResponse = "application/json"),
                (String = "text/plain")
            )
        )
    ),
    tag = "kv"
)]
pub async fn kv_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<KvResponse>, ApiError> {
    let request = decode_request(&body)?;
    let response = dispatch(state.store.as_ref(), &request).await?;
    Ok(Json(response))
}

/// Router fallback: any path that is not a documentation route is served the
/// same way as `/`.
pub async fn any_path_handler(method: Method, state: State<AppState>, body: Bytes) -> Response {
    if method == Method::POST {
        kv_handler(state, body).await.into_response()
    } else {
        usage_handler().await.into_response()
    }
}

/// Decode the first JSON value in `body`; anything after it is ignored.
pub fn decode_request(body: &[u8]) -> Result<KvRequest, ApiError> {
    let mut stream = serde_json::Deserializer::from_slice(body).into_iter::<KvRequest>();
    match stream.next() {
        Some(request) => Ok(request?),
        None => Err(ApiError::Decode("EOF while decoding request body".to_string())),
    }
}

/// Run the store operation selected by `request.action`.
pub async fn dispatch(store: &dyn KvStore, request: &KvRequest) -> Result<KvResponse, ApiError> {
    match request.action.as_str() {
        "get" => {
            let val = store.get(&request.key).await?;
            tracing::info!("Successfully retrieved key: {}", request.key);
            Ok(KvResponse::value(val))
        }
        "set" => {
            store.set(&request.key, &request.val).await?;
            tracing::info!("Successfully stored key: {}", request.key);
            Ok(KvResponse::success())
        }
        other => Err(ApiError::UnknownAction(other.to_string())),
    }
}
