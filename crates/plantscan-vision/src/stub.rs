//! 테스트 패턴 카메라.
//!
//! 실제 장치 없이 캡처 파이프라인을 구동하기 위한 `CameraDevice` 구현.
//! 데모 CLI와 테스트에서 사용한다. 그라디언트 패턴 프레임을 생성하며,
//! 워밍업 지연과 준비 신호를 외부에서 제어할 수 있다.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use plantscan_core::error::CoreError;
use plantscan_core::models::frame::RawFrame;
use plantscan_core::ports::camera::{CameraDevice, StreamConstraints, VideoStream};
use tracing::debug;

/// 테스트 패턴 카메라 — 가짜 장치 캐퍼빌리티
pub struct TestPatternCamera {
    width: u32,
    height: u32,
    /// 스트림 준비까지의 워밍업 지연
    warmup: Duration,
    /// 외부 제어용 준비 플래그 (설정 시 워밍업 지연 무시)
    ready_flag: Option<Arc<AtomicBool>>,
}

impl TestPatternCamera {
    /// 즉시 준비되는 테스트 카메라 생성
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            warmup: Duration::ZERO,
            ready_flag: None,
        }
    }

    /// 워밍업 지연 설정 — 열린 뒤 이 시간이 지나야 준비된다
    pub fn with_warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }

    /// 준비 신호를 외부 플래그로 제어
    pub fn with_ready_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.ready_flag = Some(flag);
        self
    }
}

#[async_trait]
impl CameraDevice for TestPatternCamera {
    async fn open_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn VideoStream>, CoreError> {
        debug!("테스트 패턴 스트림 시작 ({:?})", constraints.facing);
        Ok(Box::new(TestPatternStream {
            width: self.width,
            height: self.height,
            ready_at: Instant::now() + self.warmup,
            ready_flag: self.ready_flag.clone(),
            live: true,
        }))
    }
}

/// 테스트 패턴 스트림
pub struct TestPatternStream {
    width: u32,
    height: u32,
    ready_at: Instant,
    ready_flag: Option<Arc<AtomicBool>>,
    live: bool,
}

impl TestPatternStream {
    /// 즉시 준비된 스트림 생성 (테스트용)
    pub fn ready(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ready_at: Instant::now(),
            ready_flag: None,
            live: true,
        }
    }

    /// 준비 신호가 영영 오지 않는 스트림 생성 (테스트용)
    pub fn never_ready(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ready_at: Instant::now(),
            ready_flag: Some(Arc::new(AtomicBool::new(false))),
            live: true,
        }
    }
}

impl VideoStream for TestPatternStream {
    fn ready_dimensions(&self) -> Option<(u32, u32)> {
        if !self.live {
            return None;
        }
        let ready = match &self.ready_flag {
            Some(flag) => flag.load(Ordering::Relaxed),
            None => Instant::now() >= self.ready_at,
        };
        ready.then_some((self.width, self.height))
    }

    fn read_frame(&self) -> Result<RawFrame, CoreError> {
        let (width, height) = self.ready_dimensions().ok_or(CoreError::NoActiveFrame)?;

        // 그라디언트 테스트 패턴
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                rgba.push((x * 255 / width.max(1)) as u8);
                rgba.push((y * 255 / height.max(1)) as u8);
                rgba.push(96);
                rgba.push(255);
            }
        }

        Ok(RawFrame {
            rgba,
            width,
            height,
        })
    }

    fn stop(&mut self) {
        self.live = false;
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

/// 권한이 거부된 카메라 — 에러 경로 테스트/데모용
pub struct PermissionDeniedCamera;

#[async_trait]
impl CameraDevice for PermissionDeniedCamera {
    async fn open_stream(
        &self,
        _constraints: &StreamConstraints,
    ) -> Result<Box<dyn VideoStream>, CoreError> {
        Err(CoreError::PermissionDenied(
            "사용자가 카메라 접근을 거부함".to_string(),
        ))
    }
}

/// 장치가 없는 카메라 — 에러 경로 테스트용
pub struct UnavailableCamera;

#[async_trait]
impl CameraDevice for UnavailableCamera {
    async fn open_stream(
        &self,
        _constraints: &StreamConstraints,
    ) -> Result<Box<dyn VideoStream>, CoreError> {
        Err(CoreError::DeviceUnavailable(
            "사용 가능한 비디오 입력 장치 없음".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stream_produces_well_formed_frames() {
        let camera = TestPatternCamera::new(8, 6);
        let stream = camera
            .open_stream(&StreamConstraints::default())
            .await
            .unwrap();

        let frame = stream.read_frame().unwrap();
        assert!(frame.is_well_formed());
        assert_eq!((frame.width, frame.height), (8, 6));
    }

    #[tokio::test]
    async fn warmup_delays_readiness() {
        let camera = TestPatternCamera::new(8, 6).with_warmup(Duration::from_millis(50));
        let stream = camera
            .open_stream(&StreamConstraints::default())
            .await
            .unwrap();

        assert!(stream.ready_dimensions().is_none());
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(stream.ready_dimensions(), Some((8, 6)));
    }

    #[tokio::test]
    async fn ready_flag_controls_readiness() {
        let flag = Arc::new(AtomicBool::new(false));
        let camera = TestPatternCamera::new(8, 6).with_ready_flag(flag.clone());
        let stream = camera
            .open_stream(&StreamConstraints::default())
            .await
            .unwrap();

        assert!(stream.ready_dimensions().is_none());
        flag.store(true, Ordering::Relaxed);
        assert_eq!(stream.ready_dimensions(), Some((8, 6)));
    }

    #[tokio::test]
    async fn stopped_stream_is_not_ready() {
        let camera = TestPatternCamera::new(8, 6);
        let mut stream = camera
            .open_stream(&StreamConstraints::default())
            .await
            .unwrap();

        assert!(stream.is_live());
        stream.stop();
        assert!(!stream.is_live());
        assert!(stream.ready_dimensions().is_none());
    }
}
