use serde::{Deserialize, Serialize};

/// Body of a POST to the store endpoint
///
/// Missing fields decode as empty strings and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct KvRequest {
    /// `get` or `set`
    pub action: String,
    pub key: String,
    /// Value to store; ignored for `get`
    pub val: String,
}

/// Successful response; exactly one field is present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct KvResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val: Option<String>,
}

impl KvResponse {
    pub fn success() -> Self {
        Self {
            result: Some("success".to_string()),
            val: None,
        }
    }

    pub fn value(val: String) -> Self {
        Self {
            result: None,
            val: Some(val),
        }
    }
}
