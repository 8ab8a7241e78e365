//! API Response wrapper

use chrono::Utc;
use serde::Serialize;

use launchpad_core::FieldErrors;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn success_with_message(data: T, message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::success(data)
        }
    }

    pub fn error_with_fields(code: &str, message: &str, fields: Option<FieldErrors>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
                fields,
            }),
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
