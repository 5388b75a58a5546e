use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::query::Pagination;

/// Wrapper for API responses that adds the success envelope:
/// `{success: true, message?, data, pagination?}`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    data: T,
    message: Option<String>,
    pagination: Option<Pagination>,
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data,
            message: None,
            pagination: None,
            status: StatusCode::OK,
        }
    }

    /// 201 Created response.
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::success(data)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut body = json!({
            "success": true,
            "data": serde_json::to_value(&self.data)?,
        });
        if let Some(message) = &self.message {
            body["message"] = json!(message);
        }
        if let Some(pagination) = &self.pagination {
            body["pagination"] = serde_json::to_value(pagination)?;
        }
        Ok(body)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self.to_json() {
            Ok(body) => (self.status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!("failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "message": "Failed to serialize response data"
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Handler result alias: success envelope or taxonomy error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
