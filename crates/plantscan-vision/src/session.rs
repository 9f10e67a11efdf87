//! 카메라 세션.
//!
//! 장치 스트림 핸들의 단독 소유자. 열기/닫기의 모든 경로에서
//! 트랙 중지를 보장한다 (스코프 자원).

use std::sync::Arc;

use plantscan_core::error::CoreError;
use plantscan_core::ports::camera::{CameraDevice, StreamConstraints, VideoStream};
use tracing::{debug, info};

/// 카메라 세션 — 물리 카메라의 열기/닫기 담당
pub struct CameraSession {
    device: Arc<dyn CameraDevice>,
    constraints: StreamConstraints,
    stream: Option<Box<dyn VideoStream>>,
}

impl CameraSession {
    /// 주입된 장치 캐퍼빌리티로 세션 생성
    pub fn new(device: Arc<dyn CameraDevice>, constraints: StreamConstraints) -> Self {
        Self {
            device,
            constraints,
            stream: None,
        }
    }

    /// 권한 요청 후 비디오 스트림 시작.
    ///
    /// 세션당 활성 스트림은 최대 1개 — 이미 열려 있으면
    /// 이전 스트림을 먼저 닫는다 (장치 핸들 누수 방지).
    pub async fn open(&mut self) -> Result<(), CoreError> {
        self.close();

        let stream = self.device.open_stream(&self.constraints).await?;
        info!("카메라 스트림 시작 ({:?})", self.constraints.facing);
        self.stream = Some(stream);
        Ok(())
    }

    /// 모든 트랙을 중지하고 장치를 해제한다. 멱등 — 이미 닫힌 상태에서도 안전.
    pub fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            debug!("카메라 스트림 트랙 중지");
        }
    }

    /// 활성 스트림이 실행 중인지
    pub fn is_active(&self) -> bool {
        self.stream.as_ref().map(|s| s.is_live()).unwrap_or(false)
    }

    /// 활성 스트림 참조 (프레임 읽기 전용)
    pub fn stream(&self) -> Option<&dyn VideoStream> {
        self.stream.as_deref()
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.close();
    }
}
