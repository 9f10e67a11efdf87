//! # plantscan-network
//!
//! HTTP 네트워크 어댑터 크레이트.
//! 캡처된 이미지의 multipart/form-data 업로드와
//! `/test` 연결 확인 프로브를 담당한다.

pub mod connectivity;
pub mod upload_client;
