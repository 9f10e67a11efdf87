//! 원본 비디오 프레임.

use serde::{Deserialize, Serialize};

/// 비디오 스트림에서 읽은 디코딩된 프레임 1장 (RGBA, 네이티브 해상도)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFrame {
    /// RGBA 픽셀 데이터 (width * height * 4 바이트)
    pub rgba: Vec<u8>,
    /// 프레임 너비 (픽셀)
    pub width: u32,
    /// 프레임 높이 (픽셀)
    pub height: u32,
}

impl RawFrame {
    /// 픽셀 버퍼 길이가 해상도와 일치하는지
    pub fn is_well_formed(&self) -> bool {
        self.rgba.len() == (self.width as usize) * (self.height as usize) * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_frame() {
        let frame = RawFrame {
            rgba: vec![0u8; 4 * 4 * 4],
            width: 4,
            height: 4,
        };
        assert!(frame.is_well_formed());
    }

    #[test]
    fn truncated_frame_detected() {
        let frame = RawFrame {
            rgba: vec![0u8; 10],
            width: 4,
            height: 4,
        };
        assert!(!frame.is_well_formed());
    }
}
