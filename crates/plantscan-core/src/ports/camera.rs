//! 카메라 장치 포트.
//!
//! 구현: `plantscan-vision` crate (테스트 패턴 스텁), 플랫폼별 어댑터.
//! 전역 장치 API 대신 주입되는 캐퍼빌리티 핸들로 취급하여
//! 테스트에서 가짜로 대체할 수 있게 한다.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::frame::RawFrame;

/// 카메라 방향
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraFacing {
    /// 후면 카메라 — 피사체 촬영용
    #[default]
    Environment,
    /// 전면 카메라
    User,
}

/// 스트림 제약 조건
#[derive(Debug, Clone, Default)]
pub struct StreamConstraints {
    /// 요청할 카메라 방향
    pub facing: CameraFacing,
}

/// 카메라 장치 — 권한 요청과 스트림 시작을 담당하는 플랫폼 캐퍼빌리티
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// 장치 권한을 요청하고 비디오 스트림을 시작한다.
    ///
    /// 플랫폼이 거부하면 `PermissionDenied`,
    /// 카메라가 없으면 `DeviceUnavailable`로 실패한다.
    async fn open_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn VideoStream>, CoreError>;
}

/// 활성 비디오 스트림 핸들
///
/// 장치 핸들은 `CameraSession`이 단독 소유한다 — 트랙 중지는
/// 세션만 호출하며, `FrameCapturer`는 프레임만 읽는다.
pub trait VideoStream: Send + Sync {
    /// 디코딩된 네이티브 해상도. 스트림 준비 전이면 `None`.
    fn ready_dimensions(&self) -> Option<(u32, u32)>;

    /// 현재 프레임을 RGBA로 읽는다. 준비 전이면 `NoActiveFrame`.
    fn read_frame(&self) -> Result<RawFrame, CoreError>;

    /// 모든 트랙을 중지하고 장치를 해제한다. 멱등.
    fn stop(&mut self);

    /// 트랙이 실행 중인지
    fn is_live(&self) -> bool;
}
