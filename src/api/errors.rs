// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::upstream::UpstreamError;

/// Body returned when the detail page cannot be fetched
pub const DETAIL_ERROR_MESSAGE: &str = "无法获取数据";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub error: String,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// `/d/...` upstream failure
    Detail(UpstreamError),
    /// `/s/...` upstream failure
    Search(UpstreamError),
}

impl ApiError {
    fn source_error(&self) -> &UpstreamError {
        match self {
            ApiError::Detail(e) | ApiError::Search(e) => e,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        match self {
            ApiError::Detail(_) => ErrorResponse {
                error_message: None,
                error: DETAIL_ERROR_MESSAGE.to_string(),
            },
            ApiError::Search(e) => ErrorResponse {
                error_message: Some(format!("Get '{}' Error.", e.url())),
                error: e.to_string(),
            },
        }
    }

    pub fn status_code(&self) -> u16 {
        if self.source_error().is_timeout() {
            504
        } else {
            500
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Detail(e) => write!(f, "Detail fetch failed: {}", e),
            ApiError::Search(e) => write!(f, "Search fetch failed: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
