//! 캡처 UI 상태.

use serde::{Deserialize, Serialize};

/// 캡처 컨트롤러의 UI 상태
///
/// `Captured` 상태일 때만 캡처 이미지가 정확히 1장 존재한다.
/// 종료 상태는 없다 — Idle이 휴지 상태이며 머신은 캡처 UI 세션 동안 살아 있다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message")]
pub enum CaptureState {
    /// 휴지 상태 — 카메라 닫힘, 이미지 없음
    Idle,
    /// 장치 권한/스트림 준비 대기 중
    Opening,
    /// 라이브 스트림 활성 — 캡처 가능
    Streaming,
    /// 이미지 1장 보유, 카메라 닫힘
    Captured,
    /// 복구 가능한 실패 — 사용자에게 보여줄 메시지 포함
    Error(String),
}

impl CaptureState {
    /// 에러 상태인지
    pub fn is_error(&self) -> bool {
        matches!(self, CaptureState::Error(_))
    }

    /// 캡처 이미지를 보유한 상태인지
    pub fn is_captured(&self) -> bool {
        matches!(self, CaptureState::Captured)
    }
}

impl std::fmt::Display for CaptureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureState::Idle => write!(f, "Idle"),
            CaptureState::Opening => write!(f, "Opening"),
            CaptureState::Streaming => write!(f, "Streaming"),
            CaptureState::Captured => write!(f, "Captured"),
            CaptureState::Error(msg) => write!(f, "Error({msg})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_state_carries_message() {
        let state = CaptureState::Error("카메라 권한 거부".to_string());
        assert!(state.is_error());
        assert!(state.to_string().contains("권한"));
    }

    #[test]
    fn serde_tagged_representation() {
        let json = serde_json::to_string(&CaptureState::Error("x".to_string())).unwrap();
        assert!(json.contains("\"state\":\"Error\""));

        let json = serde_json::to_string(&CaptureState::Streaming).unwrap();
        assert!(json.contains("Streaming"));
    }
}
