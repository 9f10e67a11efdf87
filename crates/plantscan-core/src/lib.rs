//! # plantscan-core
//!
//! plantscan 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 캡처-업로드 파이프라인의 모든 크레이트가 공유하는 핵심 타입과
//! 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 애플리케이션 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::image::{CapturedImage, ImageOrigin};
    use crate::models::upload::UploadAck;

    #[test]
    fn captured_image_accessors() {
        let image = CapturedImage::from_camera(vec![1, 2, 3], 640, 480);
        assert_eq!(image.resolution(), (640, 480));
        assert_eq!(image.origin(), ImageOrigin::Camera);
        assert_eq!(image.len(), 3);
        assert!(!image.is_empty());
    }

    #[test]
    fn upload_ack_serde_roundtrip() {
        let ack = UploadAck {
            message: "File received".to_string(),
            filename: "plant-leaf.png".to_string(),
        };

        let json = serde_json::to_string(&ack).unwrap();
        let deserialized: UploadAck = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.message, "File received");
        assert_eq!(deserialized.filename, "plant-leaf.png");
        // 와이어 계약: size 필드는 존재하지 않는다
        assert!(!json.contains("size"));
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.server.base_url, "http://localhost:5000");
        assert_eq!(config.web.port, 5000);
        assert_eq!(config.web.client_origin, "http://localhost:5173");
        assert_eq!(config.web.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.upload.field_name, "file");
        assert_eq!(config.upload.filename, "plant-leaf.png");
    }
}
