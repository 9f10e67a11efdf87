//! PNG 인코더.
//!
//! RGBA 원본 프레임 → PNG 바이트. 업로드 파이프라인의 휴대 포맷.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, GenericImageView, ImageEncoder};
use plantscan_core::error::CoreError;
use plantscan_core::models::frame::RawFrame;
use tracing::debug;

/// RGBA 프레임을 PNG로 인코딩
pub fn encode_png(frame: &RawFrame) -> Result<Vec<u8>, CoreError> {
    if !frame.is_well_formed() {
        return Err(CoreError::Encoding(format!(
            "프레임 버퍼 크기 불일치: {}x{}, {} bytes",
            frame.width,
            frame.height,
            frame.rgba.len()
        )));
    }

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            &frame.rgba,
            frame.width,
            frame.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| CoreError::Encoding(format!("PNG 인코딩 실패: {e}")))?;

    debug!(
        "PNG 인코딩: {}x{} → {} bytes",
        frame.width,
        frame.height,
        out.len()
    );

    Ok(out)
}

/// PNG 바이트의 해상도 확인 (검증용)
pub fn decode_dimensions(png: &[u8]) -> Result<(u32, u32), CoreError> {
    let decoded = image::load_from_memory(png)
        .map_err(|e| CoreError::Encoding(format!("PNG 디코딩 실패: {e}")))?;
    Ok(decoded.dimensions())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(w: u32, h: u32) -> RawFrame {
        RawFrame {
            rgba: vec![0x7Fu8; (w * h * 4) as usize],
            width: w,
            height: h,
        }
    }

    #[test]
    fn encode_decode_preserves_dimensions() {
        let frame = make_frame(10, 10);
        let png = encode_png(&frame).unwrap();
        assert!(!png.is_empty());

        // 디코딩하면 원본 해상도와 동일해야 한다
        let (w, h) = decode_dimensions(&png).unwrap();
        assert_eq!((w, h), (10, 10));
    }

    #[test]
    fn encode_non_square_frame() {
        let frame = make_frame(640, 480);
        let png = encode_png(&frame).unwrap();
        assert_eq!(decode_dimensions(&png).unwrap(), (640, 480));
    }

    #[test]
    fn malformed_frame_rejected() {
        let frame = RawFrame {
            rgba: vec![0u8; 7],
            width: 10,
            height: 10,
        };
        let err = encode_png(&frame).unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }

    #[test]
    fn garbage_bytes_fail_decode() {
        let err = decode_dimensions(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }
}
