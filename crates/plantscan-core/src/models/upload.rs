//! 업로드 결과 및 와이어 DTO.
//!
//! `UploadAck`/`TestMessage`는 클라이언트 파싱과 서버 응답이 공유하는
//! 와이어 계약이다.

use serde::{Deserialize, Serialize};

/// 업로드 시도 결과 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    /// 서버가 수신을 확인함
    Success,
    /// 전송 실패 또는 서버 거부
    Failure,
}

/// 단일 업로드 시도의 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    /// 성공/실패
    pub status: UploadStatus,
    /// 서버 메시지 (실패 시 에러 설명)
    pub server_message: String,
    /// 서버가 기록한 파일 이름 (성공 시)
    pub uploaded_filename: Option<String>,
}

impl UploadResult {
    /// 성공 결과 생성
    pub fn success(server_message: String, uploaded_filename: String) -> Self {
        Self {
            status: UploadStatus::Success,
            server_message,
            uploaded_filename: Some(uploaded_filename),
        }
    }

    /// 실패 결과 생성
    pub fn failure(server_message: String) -> Self {
        Self {
            status: UploadStatus::Failure,
            server_message,
            uploaded_filename: None,
        }
    }

    /// 성공 여부
    pub fn is_success(&self) -> bool {
        self.status == UploadStatus::Success
    }
}

/// 업로드 수신 확인 응답 — `POST /upload-file` 200 본문
///
/// `{"message": "File received", "filename": <원본 파일명>}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadAck {
    /// 수신 확인 메시지
    pub message: String,
    /// 서버가 기록한 원본 파일 이름
    pub filename: String,
}

/// 연결 확인 메시지 — `POST /test` 요청·응답 공용 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMessage {
    /// 확인 메시지
    pub message: String,
}
