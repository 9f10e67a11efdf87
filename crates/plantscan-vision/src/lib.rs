//! # plantscan-vision
//!
//! 클라이언트 캡처 파이프라인 크레이트.
//! 카메라 세션 수명주기, 프레임 캡처, PNG 인코딩, 로컬 파일 로드와
//! 이를 조정하는 캡처 상태 머신을 담당한다.

pub mod capturer;
pub mod controller;
pub mod encoder;
pub mod loader;
pub mod session;
pub mod stub;
