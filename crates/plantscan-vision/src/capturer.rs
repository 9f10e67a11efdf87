//! 프레임 캡처.
//!
//! 활성 비디오 스트림의 현재 프레임 1장을 네이티브 해상도의
//! 오프스크린 버퍼에 그려 PNG로 인코딩한다.

use plantscan_core::error::CoreError;
use plantscan_core::models::image::CapturedImage;
use plantscan_core::ports::camera::VideoStream;
use tracing::debug;

use crate::encoder;

/// 프레임 캡처기
///
/// 스트림 준비를 기다리지 않는다 — 준비 전 호출은 `NoActiveFrame`으로
/// 실패하며, 준비 신호 대기는 호출자(컨트롤러)의 책임이다.
pub struct FrameCapturer;

impl FrameCapturer {
    /// 새 캡처기 생성
    pub fn new() -> Self {
        Self
    }

    /// 현재 프레임을 캡처해 PNG 이미지로 반환
    pub fn capture(&self, stream: &dyn VideoStream) -> Result<CapturedImage, CoreError> {
        let (width, height) = stream.ready_dimensions().ok_or(CoreError::NoActiveFrame)?;

        let frame = stream.read_frame()?;
        let png = encoder::encode_png(&frame)?;

        debug!("프레임 캡처: {width}x{height} → {} bytes", png.len());
        Ok(CapturedImage::from_camera(png, width, height))
    }
}

impl Default for FrameCapturer {
    fn default() -> Self {
        Self::new()
    }
}
