use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope returned by every endpoint. Absent parts are omitted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// List metadata; lists are never paginated, so only the count is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::success(Some(data), None, None)
    }

    /// Success with a resident-facing confirmation message
    pub fn with_message(data: Option<T>, message: &str) -> Self {
        Self::success(data, Some(message.to_string()), None)
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// List envelope with `meta.total` set to the number of items
    pub fn list(items: Vec<T>) -> Self {
        let meta = Meta {
            total: items.len() as i64,
        };
        Self::success(Some(items), None, Some(meta))
    }
}
