use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Meta {
    pub total: Option<i64>,
}

impl Meta {
    pub fn total(total: usize) -> Self {
        Self {
            total: Some(total as i64),
        }
    }

    pub fn empty() -> Self {
        Self { total: None }
    }
}

/// Envelope shared by every JSON response; errors put `{ "error": .. }` in `data`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
