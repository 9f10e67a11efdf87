//! plantscan 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 `CoreError`로 에러를 전파한다.
//! 카메라/파일 에러는 컨트롤러가 Error UI 상태로 회복시키고,
//! 업로드 에러는 호출자에게 그대로 노출된다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 캡처 파이프라인과 업로드 경로의 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 카메라 접근 권한 거부
    #[error("카메라 권한 거부: {0}")]
    PermissionDenied(String),

    /// 카메라 장치 없음 또는 사용 불가
    #[error("카메라 장치 사용 불가: {0}")]
    DeviceUnavailable(String),

    /// 디코딩된 프레임 없음 (스트림 준비 전 캡처 시도)
    #[error("활성 프레임 없음 — 스트림이 아직 준비되지 않음")]
    NoActiveFrame,

    /// 선택된 파일 없음 또는 빈 입력
    #[error("빈 입력: {0}")]
    EmptyInput(String),

    /// 파일 읽기 실패
    #[error("파일 읽기 실패: {0}")]
    ReadFailure(String),

    /// 업로드할 캡처 이미지 없음
    #[error("업로드할 이미지가 없음")]
    NothingToUpload,

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 서버가 업로드를 거부함 (2xx 외 응답)
    #[error("서버 거부 ({status}): {message}")]
    ServerRejected {
        /// HTTP 상태 코드
        status: u16,
        /// 서버 응답 본문
        message: String,
    },

    /// 이미지 인코딩/디코딩 실패
    #[error("이미지 인코딩 에러: {0}")]
    Encoding(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 사용자에게 노출 가능한 짧은 메시지.
    ///
    /// 캡처 UI는 실패를 조용히 삼키지 않고 해당 컨트롤 근처에
    /// 구체적인 메시지를 표시한다.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::PermissionDenied(_) | CoreError::DeviceUnavailable(_) => {
                "카메라 접근이 거부되었거나 사용할 수 없습니다.".to_string()
            }
            CoreError::NothingToUpload => "업로드할 이미지가 없습니다.".to_string(),
            CoreError::Network(_) | CoreError::ServerRejected { .. } => {
                "이미지 업로드에 실패했습니다.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status() {
        let err = CoreError::ServerRejected {
            status: 500,
            message: "boom".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("boom"));
    }

    #[test]
    fn user_message_for_camera_errors() {
        let denied = CoreError::PermissionDenied("NotAllowedError".to_string());
        let unavailable = CoreError::DeviceUnavailable("no device".to_string());
        assert_eq!(denied.user_message(), unavailable.user_message());
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
