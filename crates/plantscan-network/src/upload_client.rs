//! 멀티파트 업로드 클라이언트.
//!
//! `ImageUploader` 포트 구현. 캡처된 이미지 1장을 단일 `file` 필드의
//! multipart/form-data로 전송한다.
//! 호출당 정확히 1회 시도 — 암묵적 재시도 없음 (at-most-once 의미론,
//! 불안정한 네트워크에서 중복 업로드를 피한다).

use std::time::Duration;

use async_trait::async_trait;
use plantscan_core::config::{ServerConfig, UploadConfig};
use plantscan_core::error::CoreError;
use plantscan_core::models::image::CapturedImage;
use plantscan_core::models::upload::{UploadAck, UploadResult};
use plantscan_core::ports::uploader::ImageUploader;
use tracing::{debug, info, warn};

/// 업로드 엔드포인트 경로
const UPLOAD_PATH: &str = "/upload-file";

/// HTTP 업로드 클라이언트 — `ImageUploader` 포트 구현
pub struct HttpUploadClient {
    client: reqwest::Client,
    base_url: String,
    field_name: String,
    filename: String,
}

impl HttpUploadClient {
    /// 새 업로드 클라이언트 생성
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            field_name: "file".to_string(),
            filename: "plant-leaf.png".to_string(),
        })
    }

    /// 설정에서 클라이언트 생성
    pub fn from_config(server: &ServerConfig, upload: &UploadConfig) -> Result<Self, CoreError> {
        let mut client = Self::new(&server.base_url, Duration::from_secs(server.timeout_secs))?;
        client.field_name = upload.field_name.clone();
        client.filename = upload.filename.clone();
        Ok(client)
    }

    /// 업로드 파일 이름 변경
    pub fn with_filename(mut self, filename: &str) -> Self {
        self.filename = filename.to_string();
        self
    }
}

#[async_trait]
impl ImageUploader for HttpUploadClient {
    async fn upload(&self, image: &CapturedImage) -> Result<UploadResult, CoreError> {
        // 빈 이미지는 네트워크 호출 전에 차단
        if image.is_empty() {
            return Err(CoreError::NothingToUpload);
        }

        let part = reqwest::multipart::Part::bytes(image.png_data().to_vec())
            .file_name(self.filename.clone())
            .mime_str("image/png")
            .map_err(|e| CoreError::Internal(format!("MIME 설정 실패: {e}")))?;
        let form = reqwest::multipart::Form::new().part(self.field_name.clone(), part);

        debug!(
            "업로드 시작: {} ({} bytes, {:?}, id={})",
            self.filename,
            image.len(),
            image.origin(),
            image.id()
        );

        let resp = self
            .client
            .post(format!("{}{}", self.base_url, UPLOAD_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("업로드 요청 실패: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_else(|e| {
                warn!("응답 본문 읽기 실패: {e}");
                String::new()
            });
            return Err(CoreError::ServerRejected {
                status: status.as_u16(),
                message,
            });
        }

        let ack: UploadAck = resp
            .json()
            .await
            .map_err(|e| CoreError::Internal(format!("수신 확인 파싱 실패: {e}")))?;

        info!("업로드 성공: {}", ack.filename);
        Ok(UploadResult::success(ack.message, ack.filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_image() -> CapturedImage {
        CapturedImage::from_camera(vec![0x89, 0x50, 0x4E, 0x47], 10, 10)
    }

    fn make_client(url: &str) -> HttpUploadClient {
        HttpUploadClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn base_url_is_normalized() {
        let client = make_client("http://localhost:5000/");
        assert_eq!(client.base_url, "http://localhost:5000");
        assert_eq!(client.field_name, "file");
        assert_eq!(client.filename, "plant-leaf.png");
    }

    #[tokio::test]
    async fn upload_success_parses_ack() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload-file")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"File received","filename":"plant-leaf.png"}"#)
            .create_async()
            .await;

        let client = make_client(&server.url());
        let result = client.upload(&make_image()).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.server_message, "File received");
        assert_eq!(result.uploaded_filename.as_deref(), Some("plant-leaf.png"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_sends_single_file_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload-file")
            .match_body(mockito::Matcher::Regex(
                "name=\"file\"; filename=\"plant-leaf.png\"".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"File received","filename":"plant-leaf.png"}"#)
            .create_async()
            .await;

        let client = make_client(&server.url());
        client.upload(&make_image()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_image_makes_no_network_call() {
        let mut server = mockito::Server::new_async().await;
        // 네트워크 호출이 전혀 없어야 한다
        let mock = server
            .mock("POST", "/upload-file")
            .expect(0)
            .create_async()
            .await;

        let client = make_client(&server.url());
        let empty = CapturedImage::from_file(Vec::new());
        let err = client.upload(&empty).await.unwrap_err();

        assert!(matches!(err, CoreError::NothingToUpload));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload-file")
            .with_status(500)
            .with_body(r#"{"error":"Internal server error occurred"}"#)
            .create_async()
            .await;

        let client = make_client(&server.url());
        let err = client.upload(&make_image()).await.unwrap_err();

        match err {
            CoreError::ServerRejected { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("Internal server error"));
            }
            other => panic!("예상 밖 에러: {other}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_400_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload-file")
            .with_status(400)
            .with_body(r#"{"error":"No file uploaded."}"#)
            .create_async()
            .await;

        let client = make_client(&server.url());
        let err = client.upload(&make_image()).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::ServerRejected { status: 400, .. }
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        // 아무도 리스닝하지 않는 포트
        let client = make_client("http://127.0.0.1:1");
        let err = client.upload(&make_image()).await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }

    #[tokio::test]
    async fn from_config_uses_configured_names() {
        let server = ServerConfig {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        };
        let upload = UploadConfig::default();
        let client = HttpUploadClient::from_config(&server, &upload).unwrap();
        assert_eq!(client.filename, "plant-leaf.png");

        let client = client.with_filename("sample.png");
        assert_eq!(client.filename, "sample.png");
    }
}
