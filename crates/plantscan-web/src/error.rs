//! API 에러 처리.
//!
//! 클라이언트와 합의된 고정 JSON 형태 `{"error": ...}`로 매핑한다.
//! 내부 실패의 상세는 로그로만 남기고 와이어에는 고정 문구를 보낸다.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// 업로드된 파일 없음 (400)
    #[error("No file uploaded.")]
    PayloadMissing,

    /// 업로드 크기 상한 초과 (413)
    #[error("Upload exceeds size limit.")]
    PayloadTooLarge,

    /// 내부 서버 오류 (500) — 상세는 로그로만
    #[error("Internal server error occurred")]
    InternalFailure(String),
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 에러 메시지
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::PayloadMissing => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InternalFailure(detail) => {
                error!("내부 서버 오류: {detail}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<plantscan_core::error::CoreError> for ApiError {
    fn from(err: plantscan_core::error::CoreError) -> Self {
        ApiError::InternalFailure(err.to_string())
    }
}
