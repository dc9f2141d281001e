/// Plain-text hint returned for any method other than POST on the store route
pub const USAGE: &str = "use POST / to get or set keys from the database\n";

/// Fallback for non-POST requests. Never touches the store.
pub async fn usage_handler() -> &'static str {
    tracing::debug!("Rejected non-POST request with usage hint");
    USAGE
}
